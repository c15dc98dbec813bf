//! 18-decimal fixed point math.

pub mod common;
pub mod decimal;
pub mod rate;

pub use common::{TryAdd, TryDiv, TryMul};
pub use decimal::Decimal;
pub use rate::Rate;
