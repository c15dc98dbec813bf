//! Exchange rates read straight from the token contracts, never from an oracle.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::error::CollateralError;
use crate::math::common::WAD;
use crate::math::Decimal;

/// One whole wrapped token; wrapped deposit receipts carry 18 decimals.
pub const WRAPPED_ONE: u64 = WAD;

/// The yield-bearing deposit receipt held as collateral.
#[odra::external_contract]
pub trait WrappedAsset {
    /// Reference tokens (in reference decimals) redeemable for `balance` wrapped tokens.
    fn convert_balance_to_underlying(&self, balance: U256) -> U256;
    /// Wrapped balance of `owner`.
    fn balance_of(&self, owner: Address) -> U256;
}

/// The reference token the wrapped asset redeems into.
#[odra::external_contract]
pub trait ReferenceAsset {
    /// Feed-priced underlying per reference token, 18 decimals.
    fn underlying_per_token(&self) -> U256;
}

/// Normalise a raw `convert_balance_to_underlying(WRAPPED_ONE)` answer.
pub fn ref_per_tok_from_raw(raw: U256, reference_decimals: u8) -> Result<Decimal, CollateralError> {
    Decimal::from_token_amount(raw, reference_decimals)
}

/// Vet the reference token's redemption rate against its underlying.
pub fn underlying_per_ref_from_raw(raw: U256) -> Result<Decimal, CollateralError> {
    if raw.is_zero() {
        return Err(CollateralError::InvalidQuote);
    }
    Ok(Decimal::from_scaled_val(raw))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalises_reference_decimals() {
        let six = ref_per_tok_from_raw(U256::from(1_020_000u64), 6).unwrap();
        assert_eq!(six, Decimal::from_scaled_val(U256::from(1_020_000_000_000_000_000u128)));

        let eighteen = ref_per_tok_from_raw(U256::from(WRAPPED_ONE), 18).unwrap();
        assert_eq!(eighteen, Decimal::one());
    }

    #[test]
    fn zero_rate_is_accepted_for_ref_per_tok() {
        // a collapsed rate is a hard-default signal, not a read failure
        assert_eq!(ref_per_tok_from_raw(U256::zero(), 18).unwrap(), Decimal::zero());
    }

    #[test]
    fn zero_underlying_rate_is_invalid() {
        assert_eq!(underlying_per_ref_from_raw(U256::zero()), Err(CollateralError::InvalidQuote));
        assert_eq!(
            underlying_per_ref_from_raw(U256::from(WAD)).unwrap(),
            Decimal::one()
        );
    }
}
