//! Composition of feed prices and exchange rates into published quantities.
//!
//! Nothing here is cached; callers feed in fresh reads on every call.

use crate::error::CollateralError;
use crate::math::{Decimal, Rate, TryAdd, TryDiv, TryMul};

/// Expected underlying-per-target peg.
pub fn peg() -> Decimal {
    Decimal::one()
}

/// Unit-of-account price of one reference token.
pub fn reference_price(
    underlying_price: Decimal,
    underlying_per_ref: Decimal,
) -> Result<Decimal, CollateralError> {
    underlying_price.try_mul(underlying_per_ref)
}

/// Unit-of-account price of one wrapped token.
pub fn strict_price(ref_per_tok: Decimal, reference_price: Decimal) -> Result<Decimal, CollateralError> {
    ref_per_tok.try_mul(reference_price)
}

/// `numerator / denominator` with both sides in the unit of account.
pub fn price_ratio(numerator: Decimal, denominator: Decimal) -> Result<Decimal, CollateralError> {
    if denominator.is_zero() {
        return Err(CollateralError::InvalidQuote);
    }
    numerator.try_div(denominator)
}

/// Tolerated interval around the peg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PegBand {
    /// Lowest tolerated ratio
    pub low: Decimal,
    /// Highest tolerated ratio
    pub high: Decimal,
}

impl PegBand {
    /// `peg ± peg * threshold`.
    pub fn around(peg: Decimal, threshold: Rate) -> Result<Self, CollateralError> {
        let delta = peg.try_mul(threshold)?;
        Ok(Self {
            // thresholds of 100% or more leave no lower bound
            low: peg.saturating_sub(delta),
            high: peg.try_add(delta)?,
        })
    }

    /// Inclusive at both edges.
    pub fn contains(&self, ratio: Decimal) -> bool {
        ratio >= self.low && ratio <= self.high
    }
}

/// Whether the underlying still trades within `threshold` of its target.
pub fn peg_holds(
    underlying_price: Decimal,
    target_price: Decimal,
    threshold: Rate,
) -> Result<bool, CollateralError> {
    let ratio = price_ratio(underlying_price, target_price)?;
    Ok(PegBand::around(peg(), threshold)?.contains(ratio))
}

#[cfg(test)]
mod test {
    use super::*;
    use odra::casper_types::U256;

    fn wad(units: u64, thousandths: u64) -> Decimal {
        Decimal::from(units)
            .try_add(Decimal::from_scaled_val(U256::from(thousandths) * U256::from(1_000_000_000_000_000u64)))
            .unwrap()
    }

    #[test]
    fn strict_price_is_rate_times_reference_price() {
        let reference = reference_price(Decimal::from(1800u64), wad(1, 100)).unwrap();
        assert_eq!(reference, Decimal::from(1980u64));
        assert_eq!(strict_price(wad(1, 10), reference).unwrap(), wad(1999, 800));
    }

    #[test]
    fn ratio_with_zero_denominator_is_invalid() {
        assert_eq!(
            price_ratio(Decimal::one(), Decimal::zero()),
            Err(CollateralError::InvalidQuote)
        );
    }

    #[test]
    fn five_percent_band() {
        let band = PegBand::around(peg(), Rate::from_percent(5)).unwrap();
        assert_eq!(band.low, wad(0, 950));
        assert_eq!(band.high, wad(1, 50));
        assert!(band.contains(wad(0, 960)));
        assert!(band.contains(wad(1, 50)));
        assert!(!band.contains(wad(0, 940)));
    }

    #[test]
    fn wide_threshold_has_no_lower_bound() {
        let band = PegBand::around(peg(), Rate::from_percent(150)).unwrap();
        assert_eq!(band.low, Decimal::zero());
        assert!(band.contains(wad(0, 1)));
    }

    #[test]
    fn six_percent_depeg_breaks_five_percent_threshold() {
        // underlying 1692 against a 1800 target
        assert!(!peg_holds(Decimal::from(1692u64), Decimal::from(1800u64), Rate::from_percent(5)).unwrap());
        // 4% off still holds
        assert!(peg_holds(Decimal::from(1728u64), Decimal::from(1800u64), Rate::from_percent(5)).unwrap());
    }
}
