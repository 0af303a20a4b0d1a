use soroban_sdk::{log, panic_with_error, Address, Env, Map};

use crate::accrual;
use crate::errors::FlywheelError;
use crate::events::SpeedUpdated;
use crate::interfaces;
use crate::math;
use crate::storage::{self, BorrowValueSnapshot};

const STRKEY_LEN: usize = 56;

/// Contract addresses encode as `C...` strkeys, accounts as `G...`.
fn is_contract_address(addr: &Address) -> bool {
    let strkey = addr.to_string();
    if strkey.len() as usize != STRKEY_LEN {
        return false;
    }
    let mut buf = [0u8; STRKEY_LEN];
    strkey.copy_into_slice(&mut buf);
    buf[0] == b'C'
}

/// Splits the reward rate across reward markets by their share of total
/// borrow value.
///
/// A market's value is the smaller of what it is worth now and what the
/// previous refresh measured, and that measurement must come from an earlier
/// ledger. Borrow totals inflated and unwound within one transaction therefore
/// never reach the split. Every call records the current values for the next
/// one; a call with no earlier-ledger measurement only records.
pub fn refresh_speeds(env: &Env, caller: &Address) {
    if is_contract_address(caller) {
        panic_with_error!(env, FlywheelError::ReentrantSpeedRefresh);
    }
    caller.require_auth();

    let markets = storage::read_reward_markets(env);
    // Everything earned at the old speeds goes into the indexes first.
    for market in markets.iter() {
        accrual::accrue_market(env, &market, None);
    }

    let now = env.ledger().sequence();
    let previous = storage::read_borrow_values(env);
    if let Some(previous) = &previous {
        if previous.height >= now {
            log!(env, "borrow values already measured this ledger", now);
            return;
        }
    }

    let mut current: Map<Address, u128> = Map::new(env);
    for market in markets.iter() {
        let value = interfaces::borrow_value(env, &market);
        current.set(market, value);
    }
    storage::write_borrow_values(
        env,
        &BorrowValueSnapshot {
            height: now,
            values: current.clone(),
        },
    );

    let previous = match previous {
        Some(previous) => previous,
        None => {
            log!(env, "first borrow value measurement, speeds unchanged", now);
            return;
        }
    };

    let mut settled: Map<Address, u128> = Map::new(env);
    let mut total_value = 0u128;
    for market in markets.iter() {
        let now_value = current.get(market.clone()).unwrap_or(0);
        let value = now_value.min(previous.values.get(market.clone()).unwrap_or(0));
        total_value = math::add(env, total_value, value);
        settled.set(market, value);
    }

    let rate = storage::read_reward_rate(env);
    for market in markets.iter() {
        let value = settled.get(market.clone()).unwrap_or(0);
        let new_speed = if total_value == 0 {
            0
        } else {
            let share = math::fraction_double(env, value, total_value);
            math::mul_double(env, rate, share)
        };
        storage::write_speed(env, &market, new_speed);
        SpeedUpdated { market, new_speed }.publish(env);
    }
}
