use soroban_sdk::{Address, Env};

use crate::math;
use crate::storage::{self, AccrualHint, Side};

#[soroban_sdk::contractclient(name = "LendingMarketClient")]
pub trait LendingMarket {
    fn get_total_ptokens(env: Env) -> u128;
    fn get_total_borrowed(env: Env) -> u128;
    fn get_borrow_index(env: Env) -> u128;
    fn get_ptoken_balance(env: Env, user: Address) -> u128;
    fn get_user_borrow_balance(env: Env, user: Address) -> u128;
}

#[soroban_sdk::contractclient(name = "LendingRegistryClient")]
pub trait LendingRegistry {
    fn is_market_listed(env: Env, market: Address) -> bool;
}

#[soroban_sdk::contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    fn get_underlying_price(env: Env, market: Address) -> u128;
}

/// Whether `market` is one of the lending markets the protocol lists at all,
/// rewarded or not.
pub fn is_listed(env: &Env, market: &Address) -> bool {
    let registry = storage::read_lending_registry(env);
    LendingRegistryClient::new(env, &registry).is_market_listed(market)
}

/// Borrowed amount expressed in principal at the market's 1e18 interest index.
/// A market that never set its index has nothing to normalize.
fn normalize_borrows(env: &Env, amount: u128, borrow_index: u128) -> u128 {
    if borrow_index == 0 {
        return 0;
    }
    math::div_exp(env, amount, borrow_index)
}

fn borrow_index(env: &Env, market: &Address, hint: Option<&AccrualHint>) -> u128 {
    match hint.and_then(|h| h.borrow_index) {
        Some(index) => index,
        None => LendingMarketClient::new(env, market).get_borrow_index(),
    }
}

/// Size of the pool a side's speed is spread over: total pTokens for
/// suppliers, normalized total borrows for borrowers.
pub fn pool_size(env: &Env, market: &Address, side: Side, hint: Option<&AccrualHint>) -> u128 {
    match side {
        Side::Supply => match hint.and_then(|h| h.total_ptokens) {
            Some(total) => total,
            None => LendingMarketClient::new(env, market).get_total_ptokens(),
        },
        Side::Borrow => {
            let total = match hint.and_then(|h| h.total_borrowed) {
                Some(total) => total,
                None => LendingMarketClient::new(env, market).get_total_borrowed(),
            };
            if total == 0 {
                return 0;
            }
            normalize_borrows(env, total, borrow_index(env, market, hint))
        }
    }
}

/// The account's stake in a side of the pool, on the same basis as `pool_size`.
pub fn account_share(
    env: &Env,
    market: &Address,
    account: &Address,
    side: Side,
    hint: Option<&AccrualHint>,
) -> u128 {
    match side {
        Side::Supply => match hint.and_then(|h| h.user_ptokens) {
            Some(balance) => balance,
            None => LendingMarketClient::new(env, market).get_ptoken_balance(account),
        },
        Side::Borrow => {
            let debt = match hint.and_then(|h| h.user_borrowed) {
                Some(debt) => debt,
                None => LendingMarketClient::new(env, market).get_user_borrow_balance(account),
            };
            if debt == 0 {
                return 0;
            }
            normalize_borrows(env, debt, borrow_index(env, market, hint))
        }
    }
}

/// Normalized total borrows valued at the oracle price, 1e18 scaled.
pub fn borrow_value(env: &Env, market: &Address) -> u128 {
    let borrows = pool_size(env, market, Side::Borrow, None);
    if borrows == 0 {
        return 0;
    }
    let oracle = storage::read_price_oracle(env);
    let price = PriceOracleClient::new(env, &oracle).get_underlying_price(market);
    math::mul_exp(env, borrows, price)
}
