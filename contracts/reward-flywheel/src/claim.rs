use soroban_sdk::{panic_with_error, Address, Env, Map, Vec};

use crate::accrual;
use crate::errors::FlywheelError;
use crate::interfaces;
use crate::payout;
use crate::storage::Side;

/// Settles `accounts` on the requested sides of `markets`, then pays each
/// distinct account everything it has accrued.
///
/// Every market must be listed with the lending registry; a listed market
/// outside the reward set is simply skipped. Each market side is accrued once
/// for the whole batch, so repeated accounts or markets book nothing extra.
pub fn claim(
    env: &Env,
    accounts: &Vec<Address>,
    markets: &Vec<Address>,
    borrowers: bool,
    suppliers: bool,
) {
    for market in markets.iter() {
        if !interfaces::is_listed(env, &market) {
            panic_with_error!(env, FlywheelError::UnrecognizedMarket);
        }
    }

    for market in markets.iter() {
        if borrowers {
            settle_side(env, &market, accounts, Side::Borrow);
        }
        if suppliers {
            settle_side(env, &market, accounts, Side::Supply);
        }
    }

    let mut paid: Map<Address, bool> = Map::new(env);
    for account in accounts.iter() {
        if paid.contains_key(account.clone()) {
            continue;
        }
        payout::settle_and_pay(env, &account, u128::MAX);
        paid.set(account, true);
    }
}

fn settle_side(env: &Env, market: &Address, accounts: &Vec<Address>, side: Side) {
    accrual::accrue_index(env, market, side, None);
    for account in accounts.iter() {
        accrual::distribute(env, market, &account, side, None);
    }
}
