//! Reward claims forwarded to an external distributor.
//!
//! Proof verification and accounting live in the distributor; this side only
//! asks for a payout and measures what arrived.

use odra::casper_types::U256;
use odra::prelude::*;

/// Pays out accrued rewards.
#[odra::external_contract]
pub trait RewardDistributor {
    /// Token paid out by `claim`.
    fn reward_token(&self) -> Address;
    /// Pay whatever `account` can currently claim; paying nothing is not an error.
    fn claim(&mut self, account: Address, token: Address);
}

/// Token the distributor pays in.
#[odra::external_contract]
pub trait RewardToken {
    /// Balance of `owner`.
    fn balance_of(&self, owner: Address) -> U256;
}

/// Amount received across a claim, measured by balance.
pub fn received(before: U256, after: U256) -> U256 {
    after.saturating_sub(before)
}
