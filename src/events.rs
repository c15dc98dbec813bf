use odra::casper_types::U256;
use odra::prelude::*;

use crate::state::CollateralStatus;

/// Emitted exactly when the derived status changes during `refresh`.
#[odra::event]
pub struct CollateralStatusChanged {
    /// Status before the refresh
    pub old_status: CollateralStatus,
    /// Status after it
    pub new_status: CollateralStatus,
}

/// Emitted on every `claim_rewards`, including zero-amount claims.
#[odra::event]
pub struct RewardsClaimed {
    /// Reward token
    pub erc20: Address,
    /// Balance increase across the claim
    pub amount: U256,
}
