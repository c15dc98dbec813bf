#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

//! Collateral adapter pricing a yield-bearing wrapped asset on the casper blockchain.

extern crate alloc;

pub mod collateral;
/// Revert reasons.
pub mod error;
/// Events emitted by the collateral.
pub mod events;
pub mod exchange_rate;
pub mod math;
pub mod mocks;
pub mod oracle;
pub mod pricing;
pub mod rewards;
pub mod state;

pub use collateral::{PriceQuote, YieldCollateral};
pub use error::CollateralError;
