use odra::prelude::*;
use core::fmt;

/// Every way the collateral contract can refuse to answer.
#[odra::odra_error]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollateralError {
    // 0
    /// Feed answer older than the timeout, or from an unfinished round
    StaleQuote = 0,
    /// Non-positive or unusable answer
    InvalidQuote = 1,
    /// An external source refused to answer
    SourceUnavailable = 2,
    /// Checked fixed-point arithmetic failed
    MathOverflow = 3,
    /// Storage read before `init`
    NotInitialized = 4,

    // 10, construction
    /// No target feed given
    TargetFeedMissing = 10,
    /// Zero peg tolerance
    DefaultThresholdZero = 11,
    /// Zero reference decimals
    ReferenceDecimalsMissing = 12,
    /// No reference token given
    ReferenceAssetMissing = 13,
    /// No reward distributor given
    DistributorMissing = 14,

    // 15
    /// Zero fallback price
    FallbackPriceZero = 15,
    /// Zero trade-volume cap
    MaxTradeVolumeZero = 16,
    /// Zero oracle timeout
    OracleTimeoutZero = 17,
    /// Empty target name
    TargetNameMissing = 18,
    /// Zero default delay
    DelayUntilDefaultZero = 19,
}

impl CollateralError {
    /// Human-readable reason, as reported on revert.
    pub fn message(&self) -> &str {
        match self {
            CollateralError::StaleQuote => "StalePrice()",
            CollateralError::InvalidQuote => "PriceOutsideRange()",
            CollateralError::SourceUnavailable => "Price source unavailable",
            CollateralError::MathOverflow => "Math operation overflow",
            CollateralError::NotInitialized => "Collateral is not initialized",
            CollateralError::TargetFeedMissing => "targetChainlinkFeed missing",
            CollateralError::DefaultThresholdZero => "defaultThreshold zero",
            CollateralError::ReferenceDecimalsMissing => "referenceERC20Decimals missing",
            CollateralError::ReferenceAssetMissing => "reference asset missing",
            CollateralError::DistributorMissing => "eulDistributor missing",
            CollateralError::FallbackPriceZero => "fallback price zero",
            CollateralError::MaxTradeVolumeZero => "invalid max trade volume",
            CollateralError::OracleTimeoutZero => "oracleTimeout zero",
            CollateralError::TargetNameMissing => "targetName missing",
            CollateralError::DelayUntilDefaultZero => "delayUntilDefault zero",
        }
    }

    /// Quote failures the soundness check may absorb into a soft default.
    pub fn is_quote_failure(&self) -> bool {
        matches!(self, CollateralError::StaleQuote | CollateralError::InvalidQuote)
    }
}

impl core::fmt::Display for CollateralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn construction_messages_match_deployment_reverts() {
        assert_eq!(CollateralError::DefaultThresholdZero.message(), "defaultThreshold zero");
        assert_eq!(CollateralError::TargetFeedMissing.message(), "targetChainlinkFeed missing");
        assert_eq!(
            CollateralError::ReferenceDecimalsMissing.message(),
            "referenceERC20Decimals missing"
        );
        assert_eq!(CollateralError::DistributorMissing.message(), "eulDistributor missing");
        assert_eq!(CollateralError::DistributorMissing.to_string(), "eulDistributor missing");
    }

    #[test]
    fn only_quote_failures_are_absorbable() {
        assert!(CollateralError::StaleQuote.is_quote_failure());
        assert!(CollateralError::InvalidQuote.is_quote_failure());
        assert!(!CollateralError::SourceUnavailable.is_quote_failure());
        assert!(!CollateralError::MathOverflow.is_quote_failure());
    }
}
