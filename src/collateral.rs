//! The collateral contract: prices a yield-bearing wrapped asset and tracks
//! whether it still fully backs its reference unit.
//!
//! Every price is recomputed from live feeds on each call. The only mutable
//! records are the last confirmed exchange rate and the default deadline.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::error::CollateralError;
use crate::events::{CollateralStatusChanged, RewardsClaimed};
use crate::exchange_rate::{self, ReferenceAssetContractRef, WrappedAssetContractRef, WRAPPED_ONE};
use crate::math::Decimal;
use crate::oracle::{self, PriceFeedContractRef, Quote};
use crate::pricing;
use crate::rewards::{self, RewardDistributorContractRef, RewardTokenContractRef};
use crate::state::{
    Appreciation, AppreciationTracker, CollateralConfig, CollateralStatus, ConfigParams,
    DefaultTimer, NEVER,
};

/// Answer of the lenient price accessor.
#[odra::odra_type]
pub struct PriceQuote {
    /// Set when `price` is the configured fallback rather than a live quote
    pub is_fallback: bool,
    /// Unit-of-account price of one wrapped token, 18 decimals
    pub price: U256,
}

/// Collateral plugin for one yield-bearing wrapped asset.
#[odra::module(events = [CollateralStatusChanged, RewardsClaimed], errors = CollateralError)]
pub struct YieldCollateral {
    config: Var<CollateralConfig>,
    prev_ref_per_tok: Var<Decimal>,
    when_default: Var<u64>,
}

#[odra::module]
impl YieldCollateral {
    /// Validate the configuration and seed the tracked rate from the live one.
    ///
    /// Absent `target_feed`, `reference_asset` or `distributor` abort the
    /// deployment, as do zero thresholds, timeouts and volumes.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        fallback_price: U256,
        reference_feed: Address,
        target_feed: Option<Address>,
        wrapped_asset: Address,
        max_trade_volume: U256,
        oracle_timeout: u64,
        target_name: String,
        default_threshold: U256,
        delay_until_default: u64,
        reference_decimals: u8,
        reference_asset: Option<Address>,
        distributor: Option<Address>,
    ) {
        let params = ConfigParams {
            fallback_price,
            reference_feed,
            target_feed,
            wrapped_asset,
            max_trade_volume,
            oracle_timeout,
            target_name,
            default_threshold,
            delay_until_default,
            reference_decimals,
            reference_asset,
            distributor,
        };
        let config = self.or_revert(params.validate());
        let initial_rate = self.or_revert(self.live_ref_per_tok(&config));

        log::info!(
            "collateral for {} initialised at ref_per_tok {}",
            config.target_name,
            initial_rate
        );
        self.config.set(config);
        self.prev_ref_per_tok.set(initial_rate);
        self.when_default.set(NEVER);
    }

    // ===========================================================================
    // PRICES
    // ===========================================================================

    /// Unit-of-account price of one wrapped token; never consults the target feed.
    pub fn strict_price(&self) -> U256 {
        let config = self.load_config();
        self.or_revert(self.strict_price_of(&config)).to_scaled_val()
    }

    /// Like `strict_price`, but with `allow_fallback` a failed quote yields the
    /// configured fallback price instead of reverting.
    pub fn price(&self, allow_fallback: bool) -> PriceQuote {
        let config = self.load_config();
        match self.strict_price_of(&config) {
            Ok(price) => PriceQuote {
                is_fallback: false,
                price: price.to_scaled_val(),
            },
            Err(err) if allow_fallback && Self::fallback_eligible(&err) => {
                log::debug!("strict price unavailable ({}), serving fallback", err);
                PriceQuote {
                    is_fallback: true,
                    price: config.fallback_price,
                }
            }
            Err(err) => self.env().revert(err),
        }
    }

    /// Reference tokens redeemable for one wrapped token, read live.
    pub fn ref_per_tok(&self) -> U256 {
        let config = self.load_config();
        self.or_revert(self.live_ref_per_tok(&config)).to_scaled_val()
    }

    /// Reference price over target price.
    pub fn target_per_ref(&self) -> U256 {
        let config = self.load_config();
        let ratio = self.reference_price_of(&config).and_then(|reference| {
            let target = self.read_feed(config.target_feed, config.oracle_timeout)?;
            pricing::price_ratio(reference, target.price)
        });
        self.or_revert(ratio).to_scaled_val()
    }

    /// Target price over reference price.
    pub fn ref_per_target(&self) -> U256 {
        let config = self.load_config();
        let ratio = self.reference_price_of(&config).and_then(|reference| {
            let target = self.read_feed(config.target_feed, config.oracle_timeout)?;
            pricing::price_ratio(target.price, reference)
        });
        self.or_revert(ratio).to_scaled_val()
    }

    /// Reference-feed price of the asset the reference token redeems into.
    pub fn underlying_price(&self) -> U256 {
        let config = self.load_config();
        let quote = self.read_feed(config.reference_feed, config.oracle_timeout);
        self.or_revert(quote).price.to_scaled_val()
    }

    /// Unit-of-account price of one reference token.
    pub fn reference_price(&self) -> U256 {
        let config = self.load_config();
        self.or_revert(self.reference_price_of(&config)).to_scaled_val()
    }

    /// Target-feed price.
    pub fn target_price(&self) -> U256 {
        let config = self.load_config();
        let quote = self.read_feed(config.target_feed, config.oracle_timeout);
        self.or_revert(quote).price.to_scaled_val()
    }

    // ===========================================================================
    // STATUS
    // ===========================================================================

    /// Current soundness; an expired soft default reads as `Disabled` here
    /// even before the next `refresh`.
    pub fn status(&self) -> CollateralStatus {
        self.timer().status_at(self.env().get_block_time())
    }

    /// Time the collateral is or becomes `Disabled`; `NEVER` while sound.
    pub fn when_default(&self) -> u64 {
        self.timer().when_default()
    }

    /// Last confirmed non-decreasing `ref_per_tok`.
    pub fn prev_ref_per_tok(&self) -> U256 {
        self.prev_ref_per_tok.get_or_default().to_scaled_val()
    }

    /// Always true; lets the basket tell collateral from plain assets.
    pub fn is_collateral(&self) -> bool {
        true
    }

    /// Wrapped-token balance of `account`.
    pub fn bal(&self, account: Address) -> U256 {
        let config = self.load_config();
        WrappedAssetContractRef::new(self.env(), config.wrapped_asset).balance_of(account)
    }

    /// Re-evaluate soundness against live feeds and the exchange rate.
    ///
    /// A reference-feed failure reverts the whole call and leaves state as it
    /// was. Target-feed quote failures only soft-default the collateral.
    pub fn refresh(&mut self) {
        let now = self.env().get_block_time();
        let mut timer = self.timer();
        if timer.already_defaulted(now) {
            return;
        }

        let config = self.load_config();
        let old_status = timer.status_at(now);

        let ref_per_tok = self.or_revert(self.live_ref_per_tok(&config));
        let underlying = self.or_revert(self.read_feed(config.reference_feed, config.oracle_timeout));
        let strict_price = self.or_revert(
            self.reference_price_from(&config, underlying.price)
                .and_then(|reference| pricing::strict_price(ref_per_tok, reference)),
        );

        let mut tracker = AppreciationTracker::new(self.prev_ref_per_tok.get_or_default());
        let verdict = match tracker.observe(ref_per_tok) {
            Appreciation::Decreased => {
                log::warn!(
                    "ref_per_tok fell from {} to {}",
                    tracker.previous(),
                    ref_per_tok
                );
                CollateralStatus::Disabled
            }
            Appreciation::Increased | Appreciation::Unchanged => {
                self.or_revert(self.peg_verdict(&config, underlying.price))
            }
        };
        timer.mark(verdict, now, config.delay_until_default);

        self.prev_ref_per_tok.set(tracker.previous());
        self.when_default.set(timer.when_default());

        let new_status = timer.status_at(now);
        log::debug!(
            "refreshed at strict price {} (underlying quoted at {}), status {:?}",
            strict_price,
            underlying.updated_at,
            new_status
        );
        if new_status != old_status {
            log::info!("collateral status {:?} -> {:?}", old_status, new_status);
            self.env().emit_event(CollateralStatusChanged {
                old_status,
                new_status,
            });
        }
    }

    /// Ask the distributor to pay out and report what arrived.
    pub fn claim_rewards(&mut self) {
        let config = self.load_config();
        let this = self.env().self_address();

        let mut distributor = RewardDistributorContractRef::new(self.env(), config.distributor);
        let reward_token = distributor.reward_token();
        let token = RewardTokenContractRef::new(self.env(), reward_token);

        let before = token.balance_of(this);
        distributor.claim(this, reward_token);
        let amount = rewards::received(before, token.balance_of(this));

        log::info!("claimed {} of reward token {:?}", amount, reward_token);
        self.env().emit_event(RewardsClaimed {
            erc20: reward_token,
            amount,
        });
    }

    // ===========================================================================
    // CONFIGURATION
    // ===========================================================================

    /// Price served by `price(true)` when no live quote is available.
    pub fn fallback_price(&self) -> U256 {
        self.load_config().fallback_price
    }

    /// Feed pricing the underlying.
    pub fn reference_feed(&self) -> Address {
        self.load_config().reference_feed
    }

    /// Feed pricing the target unit.
    pub fn target_feed(&self) -> Address {
        self.load_config().target_feed
    }

    /// The wrapped token held as collateral.
    pub fn erc20(&self) -> Address {
        self.load_config().wrapped_asset
    }

    /// Trade-volume cap forwarded to the basket.
    pub fn max_trade_volume(&self) -> U256 {
        self.load_config().max_trade_volume
    }

    /// Maximum feed age, ms.
    pub fn oracle_timeout(&self) -> u64 {
        self.load_config().oracle_timeout
    }

    /// Name of the target unit.
    pub fn target_name(&self) -> String {
        self.load_config().target_name
    }

    /// Tolerated peg deviation, 18 decimals.
    pub fn default_threshold(&self) -> U256 {
        self.load_config().default_threshold
    }

    /// How long a soft default may last before it is confirmed, ms.
    pub fn delay_until_default(&self) -> u64 {
        self.load_config().delay_until_default
    }

    /// Decimals of the reference token.
    pub fn reference_decimals(&self) -> u8 {
        self.load_config().reference_decimals
    }

    /// Reference token contract.
    pub fn reference_asset(&self) -> Address {
        self.load_config().reference_asset
    }

    /// Reward distributor.
    pub fn distributor(&self) -> Address {
        self.load_config().distributor
    }
}

impl YieldCollateral {
    fn or_revert<T>(&self, result: Result<T, CollateralError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => self.env().revert(err),
        }
    }

    fn load_config(&self) -> CollateralConfig {
        self.config.get_or_revert_with(CollateralError::NotInitialized)
    }

    fn timer(&self) -> DefaultTimer {
        DefaultTimer::new(self.when_default.get().unwrap_or(NEVER))
    }

    fn fallback_eligible(err: &CollateralError) -> bool {
        err.is_quote_failure() || *err == CollateralError::MathOverflow
    }

    fn read_feed(&self, feed: Address, timeout: u64) -> Result<Quote, CollateralError> {
        let feed = PriceFeedContractRef::new(self.env(), feed);
        let round = feed.latest_round_data();
        oracle::vet_round(&round, feed.decimals(), self.env().get_block_time(), timeout)
    }

    fn live_ref_per_tok(&self, config: &CollateralConfig) -> Result<Decimal, CollateralError> {
        let raw = WrappedAssetContractRef::new(self.env(), config.wrapped_asset)
            .convert_balance_to_underlying(U256::from(WRAPPED_ONE));
        exchange_rate::ref_per_tok_from_raw(raw, config.reference_decimals)
    }

    fn reference_price_from(
        &self,
        config: &CollateralConfig,
        underlying_price: Decimal,
    ) -> Result<Decimal, CollateralError> {
        let raw = ReferenceAssetContractRef::new(self.env(), config.reference_asset).underlying_per_token();
        let underlying_per_ref = exchange_rate::underlying_per_ref_from_raw(raw)?;
        pricing::reference_price(underlying_price, underlying_per_ref)
    }

    fn reference_price_of(&self, config: &CollateralConfig) -> Result<Decimal, CollateralError> {
        let underlying = self.read_feed(config.reference_feed, config.oracle_timeout)?;
        self.reference_price_from(config, underlying.price)
    }

    fn strict_price_of(&self, config: &CollateralConfig) -> Result<Decimal, CollateralError> {
        let ref_per_tok = self.live_ref_per_tok(config)?;
        pricing::strict_price(ref_per_tok, self.reference_price_of(config)?)
    }

    /// Status the target feed calls for, given a fresh underlying price.
    fn peg_verdict(
        &self,
        config: &CollateralConfig,
        underlying_price: Decimal,
    ) -> Result<CollateralStatus, CollateralError> {
        match self.read_feed(config.target_feed, config.oracle_timeout) {
            Ok(target) => {
                if pricing::peg_holds(underlying_price, target.price, config.threshold())? {
                    Ok(CollateralStatus::Sound)
                } else {
                    log::warn!("underlying {} off peg against target {}", underlying_price, target.price);
                    Ok(CollateralStatus::Iffy)
                }
            }
            Err(err) if err.is_quote_failure() => {
                log::warn!("target feed unusable: {}", err);
                Ok(CollateralStatus::Iffy)
            }
            Err(err) => Err(err),
        }
    }
}
