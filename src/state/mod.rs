//! Contract configuration and the small mutable record it guards.

/// Monotonic exchange-rate tracking.
pub mod appreciation;
pub mod config;
pub mod status;

pub use appreciation::{Appreciation, AppreciationTracker};
pub use config::{CollateralConfig, ConfigParams};
pub use status::{CollateralStatus, DefaultTimer, NEVER};
