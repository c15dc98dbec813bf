//! Deterministic stand-ins for the external contracts the collateral reads.
//!
//! They back the contract tests and local deployments; production deployments
//! point the collateral at real feeds, tokens and distributors.

/// Settable and always-failing price feeds.
pub mod price_feed;
/// Reward token and distributor.
pub mod reward;
/// Wrapped and reference tokens.
pub mod tokens;

pub use price_feed::{InvalidPriceFeed, MockPriceFeed};
pub use reward::{MockDistributor, MockRewardToken};
pub use tokens::{MockReferenceAsset, MockWrappedAsset};
