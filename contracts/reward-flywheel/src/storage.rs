use soroban_sdk::{contracttype, panic_with_error, Address, Env, Map, Vec, U256};

use crate::constants::{DOUBLE_SCALE_1E36, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::FlywheelError;

#[contracttype]
pub enum DataKey {
    Admin,
    PendingAdmin,                    // Address proposed by the admin
    RewardToken,                     // Address of the reward asset
    LendingRegistry,                 // Address answering is_market_listed
    PriceOracle,                     // Address answering get_underlying_price
    RewardRate,                      // u128 scaled 1e18, per ledger across all markets
    ClaimThreshold,                  // u128 scaled 1e18
    RewardMarkets,                   // Vec<Address>, membership order
    IsRewardMarket(Address),         // bool
    SupplyState(Address),            // IndexState
    BorrowState(Address),            // IndexState
    Speed(Address),                  // u128 scaled 1e18, per ledger
    BorrowValues,                    // BorrowValueSnapshot from the last refresh
    SupplierIndex(Address, Address), // (market, account) -> U256 scaled 1e36
    BorrowerIndex(Address, Address), // (market, account) -> U256 scaled 1e36
    Accrued(Address),                // u128 scaled 1e18
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Supply,
    Borrow,
}

/// Reward index of one side of a market and the ledger it was last advanced to.
/// The index is 1e36 scaled and only ever grows, so it is kept 256 bits wide.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexState {
    pub index: U256,
    pub height: u32,
}

impl IndexState {
    pub fn fresh(env: &Env, height: u32) -> Self {
        IndexState {
            index: initial_index(env),
            height,
        }
    }
}

/// One double unit, where every index and checkpoint starts.
pub fn initial_index(env: &Env) -> U256 {
    U256::from_u128(env, DOUBLE_SCALE_1E36)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketState {
    pub supply: IndexState,
    pub borrow: IndexState,
    pub speed: u128,
    pub is_reward_market: bool,
}

/// Figures a market hands over when it calls in, so the flywheel does not
/// have to call back into it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccrualHint {
    pub total_ptokens: Option<u128>,
    pub total_borrowed: Option<u128>,
    pub borrow_index: Option<u128>,
    pub user_ptokens: Option<u128>,
    pub user_borrowed: Option<u128>,
}

/// Borrow values measured by a refresh, keyed by market.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowValueSnapshot {
    pub height: u32,
    pub values: Map<Address, u128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlywheelConfig {
    pub admin: Address,
    pub reward_token: Address,
    pub lending_registry: Address,
    pub price_oracle: Address,
    pub reward_rate: u128,
    pub claim_threshold: u128,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Admin)
}

pub fn require_admin(env: &Env) -> Address {
    let admin = read_admin(env);
    bump_core_ttl(env);
    admin.require_auth();
    admin
}

pub fn bump_core_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    for key in [
        DataKey::Admin,
        DataKey::RewardToken,
        DataKey::LendingRegistry,
        DataKey::PriceOracle,
        DataKey::RewardRate,
        DataKey::ClaimThreshold,
        DataKey::RewardMarkets,
    ] {
        if persistent.has(&key) {
            persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
    }
}

fn bump(env: &Env, key: &DataKey) {
    let persistent = env.storage().persistent();
    if persistent.has(key) {
        persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

fn read_required<T>(env: &Env, key: &DataKey) -> T
where
    T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(env, FlywheelError::NotInitialized))
}

// Config

pub fn read_admin(env: &Env) -> Address {
    read_required(env, &DataKey::Admin)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
}

pub fn read_pending_admin(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::PendingAdmin)
}

pub fn write_pending_admin(env: &Env, pending: Option<&Address>) {
    match pending {
        Some(addr) => env.storage().persistent().set(&DataKey::PendingAdmin, addr),
        None => env.storage().persistent().remove(&DataKey::PendingAdmin),
    }
}

pub fn read_reward_token(env: &Env) -> Address {
    read_required(env, &DataKey::RewardToken)
}

pub fn write_reward_token(env: &Env, token: &Address) {
    env.storage().persistent().set(&DataKey::RewardToken, token);
}

pub fn read_lending_registry(env: &Env) -> Address {
    read_required(env, &DataKey::LendingRegistry)
}

pub fn write_lending_registry(env: &Env, registry: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::LendingRegistry, registry);
}

pub fn read_price_oracle(env: &Env) -> Address {
    read_required(env, &DataKey::PriceOracle)
}

pub fn write_price_oracle(env: &Env, oracle: &Address) {
    env.storage().persistent().set(&DataKey::PriceOracle, oracle);
}

pub fn read_reward_rate(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::RewardRate)
        .unwrap_or(0u128)
}

pub fn write_reward_rate(env: &Env, rate: u128) {
    env.storage().persistent().set(&DataKey::RewardRate, &rate);
}

pub fn read_claim_threshold(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::ClaimThreshold)
        .unwrap_or(0u128)
}

pub fn write_claim_threshold(env: &Env, threshold: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::ClaimThreshold, &threshold);
}

pub fn read_config(env: &Env) -> FlywheelConfig {
    FlywheelConfig {
        admin: read_admin(env),
        reward_token: read_reward_token(env),
        lending_registry: read_lending_registry(env),
        price_oracle: read_price_oracle(env),
        reward_rate: read_reward_rate(env),
        claim_threshold: read_claim_threshold(env),
    }
}

// Reward market set

pub fn read_reward_markets(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::RewardMarkets)
        .unwrap_or(Vec::new(env))
}

pub fn write_reward_markets(env: &Env, markets: &Vec<Address>) {
    env.storage()
        .persistent()
        .set(&DataKey::RewardMarkets, markets);
}

pub fn is_reward_market(env: &Env, market: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::IsRewardMarket(market.clone()))
        .unwrap_or(false)
}

pub fn write_is_reward_market(env: &Env, market: &Address, member: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::IsRewardMarket(market.clone()), &member);
}

// Per-market flywheel state

fn state_key(market: &Address, side: Side) -> DataKey {
    match side {
        Side::Supply => DataKey::SupplyState(market.clone()),
        Side::Borrow => DataKey::BorrowState(market.clone()),
    }
}

pub fn read_index_state(env: &Env, market: &Address, side: Side) -> Option<IndexState> {
    let key = state_key(market, side);
    bump(env, &key);
    env.storage().persistent().get(&key)
}

pub fn write_index_state(env: &Env, market: &Address, side: Side, state: &IndexState) {
    let key = state_key(market, side);
    env.storage().persistent().set(&key, state);
    bump(env, &key);
}

pub fn read_speed(env: &Env, market: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Speed(market.clone()))
        .unwrap_or(0u128)
}

pub fn write_speed(env: &Env, market: &Address, speed: u128) {
    let key = DataKey::Speed(market.clone());
    env.storage().persistent().set(&key, &speed);
    bump(env, &key);
}

pub fn read_borrow_values(env: &Env) -> Option<BorrowValueSnapshot> {
    bump(env, &DataKey::BorrowValues);
    env.storage().persistent().get(&DataKey::BorrowValues)
}

pub fn write_borrow_values(env: &Env, snapshot: &BorrowValueSnapshot) {
    env.storage()
        .persistent()
        .set(&DataKey::BorrowValues, snapshot);
    bump(env, &DataKey::BorrowValues);
}

// Per-account state

fn checkpoint_key(market: &Address, account: &Address, side: Side) -> DataKey {
    match side {
        Side::Supply => DataKey::SupplierIndex(market.clone(), account.clone()),
        Side::Borrow => DataKey::BorrowerIndex(market.clone(), account.clone()),
    }
}

/// Index the account last settled at; one double unit when it never has.
pub fn read_checkpoint(env: &Env, market: &Address, account: &Address, side: Side) -> U256 {
    let key = checkpoint_key(market, account, side);
    bump(env, &key);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| initial_index(env))
}

pub fn write_checkpoint(env: &Env, market: &Address, account: &Address, side: Side, index: &U256) {
    let key = checkpoint_key(market, account, side);
    env.storage().persistent().set(&key, index);
    bump(env, &key);
}

pub fn read_accrued(env: &Env, account: &Address) -> u128 {
    let key = DataKey::Accrued(account.clone());
    bump(env, &key);
    env.storage().persistent().get(&key).unwrap_or(0u128)
}

pub fn write_accrued(env: &Env, account: &Address, amount: u128) {
    let key = DataKey::Accrued(account.clone());
    env.storage().persistent().set(&key, &amount);
    bump(env, &key);
}
