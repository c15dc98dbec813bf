use odra::casper_types::U256;
use odra::prelude::*;

use crate::error::CollateralError;
use crate::exchange_rate::WRAPPED_ONE;

/// Wrapped deposit receipt with a settable redemption rate.
#[odra::module]
pub struct MockWrappedAsset {
    /// Reference base units per whole wrapped token
    exchange_rate: Var<U256>,
    balances: Mapping<Address, U256>,
    unreachable: Var<bool>,
}

#[odra::module]
impl MockWrappedAsset {
    /// Deploy redeeming at `exchange_rate`.
    pub fn init(&mut self, exchange_rate: U256) {
        self.exchange_rate.set(exchange_rate);
    }

    /// Move the redemption rate.
    pub fn set_exchange_rate(&mut self, exchange_rate: U256) {
        self.exchange_rate.set(exchange_rate);
    }

    /// Make every read revert with `SourceUnavailable`, or stop doing so.
    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable.set(unreachable);
    }

    /// Credit `owner` with exactly `amount`.
    pub fn set_balance(&mut self, owner: Address, amount: U256) {
        self.balances.set(&owner, amount);
    }

    /// Reference base units redeemable for `balance` wrapped units.
    pub fn convert_balance_to_underlying(&self, balance: U256) -> U256 {
        self.ensure_reachable();
        let converted = balance
            .checked_mul(self.exchange_rate.get_or_default())
            .and_then(|scaled| scaled.checked_div(U256::from(WRAPPED_ONE)));
        match converted {
            Some(amount) => amount,
            None => self.env().revert(CollateralError::MathOverflow),
        }
    }

    /// Wrapped balance of `owner`.
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.ensure_reachable();
        self.balances.get_or_default(&owner)
    }
}

impl MockWrappedAsset {
    fn ensure_reachable(&self) {
        if self.unreachable.get_or_default() {
            self.env().revert(CollateralError::SourceUnavailable);
        }
    }
}

/// Reference token that redeems into the feed-priced underlying.
#[odra::module]
pub struct MockReferenceAsset {
    underlying_per_token: Var<U256>,
}

#[odra::module]
impl MockReferenceAsset {
    /// Deploy redeeming at `underlying_per_token` (18 decimals).
    pub fn init(&mut self, underlying_per_token: U256) {
        self.underlying_per_token.set(underlying_per_token);
    }

    /// Move the redemption rate.
    pub fn set_underlying_per_token(&mut self, underlying_per_token: U256) {
        self.underlying_per_token.set(underlying_per_token);
    }

    /// Underlying per reference token, 18 decimals.
    pub fn underlying_per_token(&self) -> U256 {
        self.underlying_per_token.get_or_default()
    }
}
