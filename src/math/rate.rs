//! Fractional rate (thresholds, tolerances) scaled by 10^18.

use {
    crate::math::{common::*, Decimal},
    alloc::{format, string::ToString},
    core::fmt,
    odra::casper_types::U256,
};

/// A fraction where `Rate::one()` is 100%
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rate(pub U256);

impl Rate {
    /// One (100%)
    pub fn one() -> Self {
        Self(Self::wad())
    }

    /// Zero (0%)
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    /// Create rate from percent value (0-100)
    pub fn from_percent(percent: u8) -> Self {
        Self(U256::from(percent as u64 * PERCENT_SCALER))
    }

    /// Return raw scaled value
    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }

    /// Create rate from scaled value
    pub fn from_scaled_val(scaled_val: U256) -> Self {
        Self(scaled_val)
    }

    /// Whether the rate is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            let padding = "0".repeat(SCALE - scaled_val.len());
            scaled_val = format!("0.{}{}", padding, scaled_val);
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}

impl From<Decimal> for Rate {
    fn from(decimal: Decimal) -> Self {
        Self::from_scaled_val(decimal.to_scaled_val())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::TryMul;

    #[test]
    fn test_rate_percent() {
        let rate = Rate::from_percent(5);
        assert_eq!(rate.to_scaled_val(), U256::from(50_000_000_000_000_000u64));
        assert_eq!(rate.to_string(), "0.050000000000000000");
    }

    #[test]
    fn scales_a_decimal() {
        let tolerance = Decimal::from(2000u64).try_mul(Rate::from_percent(5)).unwrap();
        assert_eq!(tolerance, Decimal::from(100u64));
        assert!(Rate::zero().is_zero());
        assert_eq!(Decimal::from(Rate::one()), Decimal::one());
    }
}
