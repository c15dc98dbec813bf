//! Immutable configuration written once by `init`.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::error::CollateralError;
use crate::math::{Decimal, Rate};

/// Constructor arguments before validation; absent addresses are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ConfigParams {
    pub fallback_price: U256,
    pub reference_feed: Address,
    pub target_feed: Option<Address>,
    pub wrapped_asset: Address,
    pub max_trade_volume: U256,
    pub oracle_timeout: u64,
    pub target_name: String,
    pub default_threshold: U256,
    pub delay_until_default: u64,
    pub reference_decimals: u8,
    pub reference_asset: Option<Address>,
    pub distributor: Option<Address>,
}

/// Validated collateral configuration.
#[odra::odra_type]
pub struct CollateralConfig {
    /// Unit-of-account price served when the caller accepts a fallback (18 decimals)
    pub fallback_price: U256,
    /// Feed pricing the asset the reference token redeems into
    pub reference_feed: Address,
    /// Feed pricing the target unit
    pub target_feed: Address,
    /// The wrapped token itself; also the exchange-rate source
    pub wrapped_asset: Address,
    /// Opaque cap forwarded to the basket
    pub max_trade_volume: U256,
    /// Maximum feed age in milliseconds
    pub oracle_timeout: u64,
    /// Opaque name of the target unit
    pub target_name: String,
    /// Tolerated peg deviation as an 18-decimal fraction
    pub default_threshold: U256,
    /// Milliseconds a soft default may persist before it is confirmed
    pub delay_until_default: u64,
    /// Decimals of the reference token
    pub reference_decimals: u8,
    /// Reference token, publishing its underlying redemption rate
    pub reference_asset: Address,
    /// Reward distributor
    pub distributor: Address,
}

impl ConfigParams {
    /// Check every construction invariant, in deployment order.
    pub fn validate(self) -> Result<CollateralConfig, CollateralError> {
        if self.fallback_price.is_zero() {
            return Err(CollateralError::FallbackPriceZero);
        }
        if self.max_trade_volume.is_zero() {
            return Err(CollateralError::MaxTradeVolumeZero);
        }
        if self.oracle_timeout == 0 {
            return Err(CollateralError::OracleTimeoutZero);
        }
        if self.target_name.is_empty() {
            return Err(CollateralError::TargetNameMissing);
        }
        if self.delay_until_default == 0 {
            return Err(CollateralError::DelayUntilDefaultZero);
        }
        if self.default_threshold.is_zero() {
            return Err(CollateralError::DefaultThresholdZero);
        }
        if self.reference_decimals == 0 {
            return Err(CollateralError::ReferenceDecimalsMissing);
        }
        let target_feed = self.target_feed.ok_or(CollateralError::TargetFeedMissing)?;
        let reference_asset = self.reference_asset.ok_or(CollateralError::ReferenceAssetMissing)?;
        let distributor = self.distributor.ok_or(CollateralError::DistributorMissing)?;

        Ok(CollateralConfig {
            fallback_price: self.fallback_price,
            reference_feed: self.reference_feed,
            target_feed,
            wrapped_asset: self.wrapped_asset,
            max_trade_volume: self.max_trade_volume,
            oracle_timeout: self.oracle_timeout,
            target_name: self.target_name,
            default_threshold: self.default_threshold,
            delay_until_default: self.delay_until_default,
            reference_decimals: self.reference_decimals,
            reference_asset,
            distributor,
        })
    }
}

impl CollateralConfig {
    /// Fallback price as a [`Decimal`].
    pub fn fallback(&self) -> Decimal {
        Decimal::from_scaled_val(self.fallback_price)
    }

    /// Peg tolerance as a [`Rate`].
    pub fn threshold(&self) -> Rate {
        Rate::from_scaled_val(self.default_threshold)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use odra::casper_types::account::AccountHash;

    fn addr(byte: u8) -> Address {
        Address::Account(AccountHash::new([byte; 32]))
    }

    fn params() -> ConfigParams {
        ConfigParams {
            fallback_price: U256::from(1_000u64),
            reference_feed: addr(1),
            target_feed: Some(addr(2)),
            wrapped_asset: addr(3),
            max_trade_volume: U256::from(1_000_000u64),
            oracle_timeout: 86_400_000,
            target_name: String::from("ETH"),
            default_threshold: U256::from(50_000_000_000_000_000u64),
            delay_until_default: 86_400_000,
            reference_decimals: 18,
            reference_asset: Some(addr(4)),
            distributor: Some(addr(5)),
        }
    }

    #[test]
    fn accepts_complete_params() {
        let config = params().validate().unwrap();
        assert_eq!(config.target_feed, addr(2));
        assert_eq!(config.threshold(), Rate::from_percent(5));
        assert_eq!(config.fallback(), Decimal::from_scaled_val(U256::from(1_000u64)));
    }

    #[test]
    fn each_missing_requirement_has_its_own_error() {
        let cases: [(fn(&mut ConfigParams), CollateralError); 10] = [
            (|p| p.fallback_price = U256::zero(), CollateralError::FallbackPriceZero),
            (|p| p.max_trade_volume = U256::zero(), CollateralError::MaxTradeVolumeZero),
            (|p| p.oracle_timeout = 0, CollateralError::OracleTimeoutZero),
            (|p| p.target_name = String::new(), CollateralError::TargetNameMissing),
            (|p| p.delay_until_default = 0, CollateralError::DelayUntilDefaultZero),
            (|p| p.default_threshold = U256::zero(), CollateralError::DefaultThresholdZero),
            (|p| p.reference_decimals = 0, CollateralError::ReferenceDecimalsMissing),
            (|p| p.target_feed = None, CollateralError::TargetFeedMissing),
            (|p| p.reference_asset = None, CollateralError::ReferenceAssetMissing),
            (|p| p.distributor = None, CollateralError::DistributorMissing),
        ];
        for (break_it, expected) in cases {
            let mut p = params();
            break_it(&mut p);
            assert_eq!(p.validate(), Err(expected));
        }
    }
}
