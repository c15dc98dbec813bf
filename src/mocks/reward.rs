use odra::casper_types::U256;
use odra::prelude::*;

use crate::error::CollateralError;

/// Bare fungible token: balances, minting and caller-initiated transfers.
#[odra::module]
pub struct MockRewardToken {
    balances: Mapping<Address, U256>,
}

#[odra::module]
impl MockRewardToken {
    /// Create `amount` tokens for `to`.
    pub fn mint(&mut self, to: Address, amount: U256) {
        let balance = self.balances.get_or_default(&to);
        match balance.checked_add(amount) {
            Some(updated) => self.balances.set(&to, updated),
            None => self.env().revert(CollateralError::MathOverflow),
        }
    }

    /// Move `amount` from the caller to `to`.
    pub fn transfer(&mut self, to: Address, amount: U256) {
        let from = self.env().caller();
        let from_balance = self.balances.get_or_default(&from);
        let Some(remaining) = from_balance.checked_sub(amount) else {
            self.env().revert(CollateralError::MathOverflow)
        };
        self.balances.set(&from, remaining);
        let to_balance = self.balances.get_or_default(&to);
        match to_balance.checked_add(amount) {
            Some(updated) => self.balances.set(&to, updated),
            None => self.env().revert(CollateralError::MathOverflow),
        }
    }

    /// Token balance of `owner`.
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get_or_default(&owner)
    }
}

/// Distributor paying out a preset claimable amount from its own balance.
#[odra::module]
pub struct MockDistributor {
    token: Var<Address>,
    claimable: Var<U256>,
}

#[odra::module]
impl MockDistributor {
    /// Deploy paying out `token`.
    pub fn init(&mut self, token: Address) {
        self.token.set(token);
    }

    /// Amount the next `claim` pays out.
    pub fn set_claimable(&mut self, amount: U256) {
        self.claimable.set(amount);
    }

    /// Amount still waiting to be claimed.
    pub fn claimable(&self) -> U256 {
        self.claimable.get_or_default()
    }

    /// Token paid out by `claim`.
    pub fn reward_token(&self) -> Address {
        self.token.get_or_revert_with(CollateralError::NotInitialized)
    }

    /// Pay the whole claimable amount to `account`; nothing pending is a no-op.
    pub fn claim(&mut self, account: Address, token: Address) {
        let reward_token = self.reward_token();
        if token != reward_token {
            self.env().revert(CollateralError::SourceUnavailable);
        }

        let amount = self.claimable.get_or_default();
        if amount.is_zero() {
            return;
        }
        self.claimable.set(U256::zero());
        MockRewardTokenContractRef::new(self.env(), reward_token).transfer(account, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, NoArgs};
    use odra::prelude::Addressable;

    #[test]
    fn transfer_rejects_overflowing_recipient() {
        let env = odra_test::env();
        let (sender, recipient) = (env.get_account(0), env.get_account(1));
        let mut token = MockRewardToken::deploy(&env, NoArgs);
        token.mint(sender, U256::one());
        token.mint(recipient, U256::MAX);

        env.set_caller(sender);
        assert_eq!(
            token.try_transfer(recipient, U256::one()),
            Err(CollateralError::MathOverflow.into())
        );
        assert_eq!(token.balance_of(sender), U256::one());
        assert_eq!(token.balance_of(recipient), U256::MAX);
    }

    #[test]
    fn distributor_pays_claimable_once() {
        let env = odra_test::env();
        let mut token = MockRewardToken::deploy(&env, NoArgs);
        let mut distributor = MockDistributor::deploy(
            &env,
            MockDistributorInitArgs {
                token: token.address(),
            },
        );
        let account = env.get_account(2);
        token.mint(distributor.address(), U256::from(500u64));

        distributor.set_claimable(U256::from(200u64));
        distributor.claim(account, token.address());
        distributor.claim(account, token.address());
        assert_eq!(token.balance_of(account), U256::from(200u64));
        assert_eq!(token.balance_of(distributor.address()), U256::from(300u64));
    }
}
