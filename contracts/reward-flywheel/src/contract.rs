use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, Map, Vec, U256};

use crate::accrual;
use crate::claim;
use crate::errors::FlywheelError;
use crate::events::*;
use crate::math;
use crate::payout;
use crate::registry;
use crate::speeds;
use crate::storage::{
    self, AccrualHint, BorrowValueSnapshot, FlywheelConfig, IndexState, MarketState, Side,
};

#[contract]
pub struct RewardFlywheel;

#[contractimpl]
impl RewardFlywheel {
    /// One-time setup. `reward_rate` is the reward handed out per ledger across
    /// all reward markets and `claim_threshold` the smallest payout; both are
    /// scaled 1e18.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        lending_registry: Address,
        price_oracle: Address,
        reward_rate: u128,
        claim_threshold: u128,
    ) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, FlywheelError::AlreadyInitialized);
        }
        admin.require_auth();
        storage::write_admin(&env, &admin);
        storage::write_reward_token(&env, &reward_token);
        storage::write_lending_registry(&env, &lending_registry);
        storage::write_price_oracle(&env, &price_oracle);
        storage::write_reward_rate(&env, reward_rate);
        storage::write_claim_threshold(&env, claim_threshold);
        storage::write_reward_markets(&env, &Vec::new(&env));
        storage::bump_core_ttl(&env);
    }

    // Admin

    /// First half of the admin handover; the proposed address must call
    /// `accept_admin` itself.
    pub fn propose_admin(env: Env, pending_admin: Address) {
        storage::require_admin(&env);
        storage::write_pending_admin(&env, Some(&pending_admin));
        AdminProposed { pending_admin }.publish(&env);
    }

    pub fn accept_admin(env: Env, pending_admin: Address) {
        pending_admin.require_auth();
        if storage::read_pending_admin(&env) != Some(pending_admin.clone()) {
            panic_with_error!(&env, FlywheelError::Unauthorized);
        }
        let old_admin = storage::read_admin(&env);
        storage::write_admin(&env, &pending_admin);
        storage::write_pending_admin(&env, None);
        storage::bump_core_ttl(&env);
        AdminUpdated {
            old_admin,
            admin: pending_admin,
        }
        .publish(&env);
    }

    /// Takes effect at the next `refresh_speeds`.
    pub fn set_reward_rate(env: Env, new_rate: u128) {
        storage::require_admin(&env);
        let old_rate = storage::read_reward_rate(&env);
        storage::write_reward_rate(&env, new_rate);
        RewardRateUpdated { old_rate, new_rate }.publish(&env);
    }

    pub fn set_claim_threshold(env: Env, new_threshold: u128) {
        storage::require_admin(&env);
        let old_threshold = storage::read_claim_threshold(&env);
        storage::write_claim_threshold(&env, new_threshold);
        ClaimThresholdUpdated {
            old_threshold,
            new_threshold,
        }
        .publish(&env);
    }

    pub fn set_price_oracle(env: Env, oracle: Address) {
        storage::require_admin(&env);
        storage::write_price_oracle(&env, &oracle);
        PriceOracleUpdated { oracle }.publish(&env);
    }

    pub fn add_markets(env: Env, markets: Vec<Address>) {
        storage::require_admin(&env);
        registry::add_markets(&env, &markets);
    }

    pub fn drop_market(env: Env, market: Address) {
        storage::require_admin(&env);
        registry::drop_market(&env, &market);
    }

    // Speeds and accrual

    /// Recomputes every reward market's speed from borrow values measured at
    /// two different ledgers: the previous refresh's and the current one.
    /// `caller` must be an account, never a contract.
    pub fn refresh_speeds(env: Env, caller: Address) {
        storage::bump_core_ttl(&env);
        speeds::refresh_speeds(&env, &caller);
    }

    /// Advances both reward indexes of `market` to the current ledger.
    pub fn accrue_market(env: Env, market: Address) {
        accrual::accrue_market(&env, &market, None);
    }

    /// Market hook: called before a market changes `user`'s supply or borrow
    /// position. Accrues the market and books what `user` earned so far on
    /// both sides. A market passing a hint must authorize the call, since the
    /// hinted figures replace reads from the market.
    pub fn accrue_user_market(env: Env, user: Address, market: Address, hint: Option<AccrualHint>) {
        if hint.is_some() {
            market.require_auth();
        }
        let hint = hint.as_ref();
        for side in [Side::Supply, Side::Borrow] {
            accrual::settle(&env, &market, &user, side, hint);
        }
    }

    // Claims

    /// Settles `accounts` over `markets` on the requested sides and pays each
    /// distinct account what it has accrued.
    pub fn claim(
        env: Env,
        accounts: Vec<Address>,
        markets: Vec<Address>,
        borrowers: bool,
        suppliers: bool,
    ) {
        storage::bump_core_ttl(&env);
        claim::claim(&env, &accounts, &markets, borrowers, suppliers);
    }

    /// Both sides of the given markets for a single account.
    pub fn claim_markets(env: Env, account: Address, markets: Vec<Address>) {
        let accounts = Vec::from_array(&env, [account]);
        Self::claim(env, accounts, markets, true, true);
    }

    /// Both sides of every current reward market for a single account.
    pub fn claim_all(env: Env, account: Address) {
        let markets = storage::read_reward_markets(&env);
        Self::claim_markets(env, account, markets);
    }

    // Views

    pub fn get_reward_markets(env: Env) -> Vec<Address> {
        storage::read_reward_markets(&env)
    }

    pub fn is_reward_market(env: Env, market: Address) -> bool {
        storage::is_reward_market(&env, &market)
    }

    pub fn get_market_state(env: Env, market: Address) -> Option<MarketState> {
        let supply: IndexState = storage::read_index_state(&env, &market, Side::Supply)?;
        let borrow: IndexState = storage::read_index_state(&env, &market, Side::Borrow)?;
        Some(MarketState {
            supply,
            borrow,
            speed: storage::read_speed(&env, &market),
            is_reward_market: storage::is_reward_market(&env, &market),
        })
    }

    /// Borrow values the next `refresh_speeds` compares against.
    pub fn get_borrow_values(env: Env) -> Option<BorrowValueSnapshot> {
        storage::read_borrow_values(&env)
    }

    pub fn get_speed(env: Env, market: Address) -> u128 {
        storage::read_speed(&env, &market)
    }

    pub fn get_accrued(env: Env, account: Address) -> u128 {
        storage::read_accrued(&env, &account)
    }

    pub fn get_checkpoint(env: Env, market: Address, account: Address, side: Side) -> U256 {
        storage::read_checkpoint(&env, &market, &account, side)
    }

    /// Accrued reward plus what a claim over `markets` would book at the
    /// current ledger. Read-only.
    pub fn pending_reward(env: Env, account: Address, markets: Vec<Address>) -> u128 {
        let mut pending = storage::read_accrued(&env, &account);
        let mut seen: Map<Address, bool> = Map::new(&env);
        for market in markets.iter() {
            if seen.contains_key(market.clone()) {
                continue;
            }
            let owed = accrual::pending_in_market(&env, &market, &account);
            pending = math::add(&env, pending, owed);
            seen.set(market, true);
        }
        pending
    }

    pub fn get_config(env: Env) -> FlywheelConfig {
        storage::read_config(&env)
    }

    pub fn get_admin(env: Env) -> Address {
        storage::read_admin(&env)
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        storage::read_pending_admin(&env)
    }

    pub fn get_reward_rate(env: Env) -> u128 {
        storage::read_reward_rate(&env)
    }

    pub fn get_claim_threshold(env: Env) -> u128 {
        storage::read_claim_threshold(&env)
    }

    pub fn get_reward_token(env: Env) -> Address {
        storage::read_reward_token(&env)
    }

    /// Pays up to `cap` of what `account` has already accrued, without
    /// settling any market first. Subject to the claim threshold.
    pub fn pay_accrued(env: Env, account: Address, cap: u128) -> u128 {
        payout::settle_and_pay(&env, &account, cap)
    }
}
