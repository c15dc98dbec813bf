//! 18-decimal fixed point value backed by `U256`.
//!
//! Prices, exchange rates and peg ratios are all carried as [`Decimal`]. The
//! raw scaled value is what crosses the contract boundary.

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::manual_range_contains)]

use {
    crate::{
        error::CollateralError,
        math::{common::*, Rate},
    },
    alloc::{string::ToString, vec},
    core::fmt,
    odra::casper_types::U256,
};

/// Large decimal values, precise to 18 digits
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Decimal(pub U256);

impl odra::casper_types::bytesrepr::ToBytes for Decimal {
    fn to_bytes(&self) -> Result<alloc::vec::Vec<u8>, odra::casper_types::bytesrepr::Error> {
        self.0.to_bytes()
    }

    fn serialized_length(&self) -> usize {
        self.0.serialized_length()
    }
}

impl odra::casper_types::bytesrepr::FromBytes for Decimal {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), odra::casper_types::bytesrepr::Error> {
        let (value, remainder) = U256::from_bytes(bytes)?;
        Ok((Decimal(value), remainder))
    }
}

impl odra::casper_types::CLTyped for Decimal {
    fn cl_type() -> odra::casper_types::CLType {
        odra::casper_types::CLType::U256
    }
}

/// `10^exp` without panicking on overflow.
pub(crate) fn ten_pow(exp: u32) -> Result<U256, CollateralError> {
    U256::from(10u64)
        .checked_pow(U256::from(exp))
        .ok_or(CollateralError::MathOverflow)
}

impl Decimal {
    /// One
    pub fn one() -> Self {
        Self(Self::wad())
    }

    /// Zero
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    fn wad() -> U256 {
        U256::from(WAD)
    }

    /// Create scaled decimal from percent value
    pub fn from_percent(percent: u8) -> Self {
        Self(U256::from(percent as u64 * PERCENT_SCALER))
    }

    /// Raw value scaled by 10^18
    pub fn to_scaled_val(&self) -> U256 {
        self.0
    }

    /// Create decimal from a value already scaled by 10^18
    pub fn from_scaled_val(scaled_val: U256) -> Self {
        Self(scaled_val)
    }

    /// Rescale an integer amount carrying `decimals` digits of precision.
    ///
    /// Amounts with more than 18 decimals lose the extra digits (floor).
    pub fn from_token_amount(amount: U256, decimals: u8) -> Result<Self, CollateralError> {
        let decimals = decimals as usize;
        if decimals <= SCALE {
            let factor = ten_pow((SCALE - decimals) as u32)?;
            amount
                .checked_mul(factor)
                .map(Self)
                .ok_or(CollateralError::MathOverflow)
        } else {
            let factor = ten_pow((decimals - SCALE) as u32)?;
            amount
                .checked_div(factor)
                .map(Self)
                .ok_or(CollateralError::MathOverflow)
        }
    }

    /// Whether the value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, flooring at zero
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            scaled_val.insert_str(0, &vec!["0"; SCALE - scaled_val.len()].join(""));
            scaled_val.insert_str(0, "0.");
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}

impl From<u64> for Decimal {
    fn from(val: u64) -> Self {
        // WAD * u64::MAX fits comfortably in 256 bits
        Self(Self::wad() * U256::from(val))
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        Self::from_scaled_val(rate.to_scaled_val())
    }
}

impl TryMul<Rate> for Decimal {
    fn try_mul(self, rhs: Rate) -> Result<Self, CollateralError> {
        self.try_mul(Decimal::from(rhs))
    }
}

impl TryAdd for Decimal {
    fn try_add(self, rhs: Self) -> Result<Self, CollateralError> {
        Ok(Self(self.0.checked_add(rhs.0).ok_or(CollateralError::MathOverflow)?))
    }
}

impl TryDiv<Decimal> for Decimal {
    fn try_div(self, rhs: Self) -> Result<Self, CollateralError> {
        Ok(Self(
            self.0
                .checked_mul(Self::wad())
                .ok_or(CollateralError::MathOverflow)?
                .checked_div(rhs.0)
                .ok_or(CollateralError::MathOverflow)?,
        ))
    }
}

impl TryMul<Decimal> for Decimal {
    fn try_mul(self, rhs: Self) -> Result<Self, CollateralError> {
        Ok(Self(
            self.0
                .checked_mul(rhs.0)
                .ok_or(CollateralError::MathOverflow)?
                .checked_div(Self::wad())
                .ok_or(CollateralError::MathOverflow)?,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_scaler() {
        assert_eq!(U256::from(WAD), Decimal::wad());
    }

    #[test]
    fn rescales_token_amounts_to_wad() {
        let six = Decimal::from_token_amount(U256::from(1_500_000u64), 6).unwrap();
        assert_eq!(six, Decimal::from_scaled_val(U256::from(1_500_000_000_000_000_000u128)));

        let eighteen = Decimal::from_token_amount(U256::from(WAD), 18).unwrap();
        assert_eq!(eighteen, Decimal::one());

        // 20 decimals drop the two extra digits
        let twenty = Decimal::from_token_amount(U256::from(12_345u64), 20).unwrap();
        assert_eq!(twenty, Decimal::from_scaled_val(U256::from(123u64)));
    }

    #[test]
    fn rejects_overflowing_rescale() {
        assert_eq!(
            Decimal::from_token_amount(U256::MAX, 0),
            Err(CollateralError::MathOverflow)
        );
    }

    #[test]
    fn mul_and_div_keep_wad_scale() {
        let price = Decimal::from(1800u64);
        let rate = Decimal::from_scaled_val(U256::from(1_020_000_000_000_000_000u128));
        assert_eq!(price.try_mul(rate).unwrap(), Decimal::from(1836u64));
        assert_eq!(Decimal::from(1836u64).try_div(rate).unwrap(), price);
        assert_eq!(price.try_div(Decimal::zero()), Err(CollateralError::MathOverflow));
    }

    #[test]
    fn display_pads_fraction() {
        assert_eq!(Decimal::from_percent(5).to_string(), "0.050000000000000000");
        assert_eq!(Decimal::from(2u64).to_string(), "2.000000000000000000");
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(Decimal::one().saturating_sub(Decimal::from(2u64)), Decimal::zero());
    }
}
