//! Shared scalers and checked arithmetic traits for [`Decimal`](super::Decimal)
//! and [`Rate`](super::Rate).
//!
//! Every operation reports `CollateralError::MathOverflow` instead of wrapping
//! or panicking.

use crate::error::CollateralError;

/// Scale of precision
pub const SCALE: usize = 18;
/// Identity
pub const WAD: u64 = 1_000_000_000_000_000_000;
/// Scale for percentages
pub const PERCENT_SCALER: u64 = 10_000_000_000_000_000;

/// Try to add, return an error on overflow
pub trait TryAdd: Sized {
    /// Add
    fn try_add(self, rhs: Self) -> Result<Self, CollateralError>;
}

/// Try to divide, return an error on overflow or divide by zero
pub trait TryDiv<RHS = Self>: Sized {
    /// Divide
    fn try_div(self, rhs: RHS) -> Result<Self, CollateralError>;
}

/// Try to multiply, return an error on overflow
pub trait TryMul<RHS = Self>: Sized {
    /// Multiply
    fn try_mul(self, rhs: RHS) -> Result<Self, CollateralError>;
}
