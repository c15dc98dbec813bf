//! Reading and vetting a single aggregator price feed.

use odra::prelude::*;

use crate::error::CollateralError;
use crate::math::Decimal;

/// Latest answer published by an aggregator feed.
#[odra::odra_type]
pub struct RoundData {
    /// Round the answer belongs to
    pub round_id: u64,
    /// Price scaled by the feed's `decimals()`
    pub answer: i64,
    /// Host block time (ms) of the last update, zero if never updated
    pub updated_at: u64,
    /// Round in which the answer was computed; behind `round_id` while a round is open
    pub answered_in_round: u64,
}

/// Aggregator-style price source.
#[odra::external_contract]
pub trait PriceFeed {
    /// Decimals of `RoundData::answer`.
    fn decimals(&self) -> u8;
    /// Most recent round.
    fn latest_round_data(&self) -> RoundData;
}

/// A vetted feed answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    /// Price rescaled to 18 decimals
    pub price: Decimal,
    /// Publication time of the round, ms
    pub updated_at: u64,
}

/// Milliseconds elapsed since `updated_at`.
///
/// An update stamped in the future counts as brand new.
pub fn age(updated_at: u64, now: u64) -> u64 {
    now.saturating_sub(updated_at)
}

/// Turn raw round data into an 18-decimal price.
///
/// Staleness is checked before the value so an old zero reads as stale.
pub fn vet_round(
    round: &RoundData,
    feed_decimals: u8,
    now: u64,
    timeout: u64,
) -> Result<Quote, CollateralError> {
    if round.updated_at == 0 || round.answered_in_round < round.round_id {
        return Err(CollateralError::StaleQuote);
    }
    if age(round.updated_at, now) > timeout {
        return Err(CollateralError::StaleQuote);
    }
    if round.answer <= 0 {
        return Err(CollateralError::InvalidQuote);
    }

    let price = Decimal::from_token_amount(
        odra::casper_types::U256::from(round.answer.unsigned_abs()),
        feed_decimals,
    )?;
    // a positive answer can still round away with an oversized decimals()
    if price.is_zero() {
        return Err(CollateralError::InvalidQuote);
    }
    Ok(Quote { price, updated_at: round.updated_at })
}
