use soroban_sdk::{panic_with_error, Address, Env, Vec};

use crate::accrual;
use crate::errors::FlywheelError;
use crate::events::RewardMarketUpdated;
use crate::interfaces;
use crate::storage::{self, IndexState, Side};

/// Appends `markets` to the reward set in the given order.
///
/// A market that was a member before keeps the index and height it was
/// frozen at; only a never-seen market starts from one double unit at the
/// current ledger.
pub fn add_markets(env: &Env, markets: &Vec<Address>) {
    let mut members = storage::read_reward_markets(env);
    let now = env.ledger().sequence();
    for market in markets.iter() {
        if !interfaces::is_listed(env, &market) {
            panic_with_error!(env, FlywheelError::UnrecognizedMarket);
        }
        if storage::is_reward_market(env, &market) {
            panic_with_error!(env, FlywheelError::AlreadyMember);
        }
        members.push_back(market.clone());
        storage::write_is_reward_market(env, &market, true);
        for side in [Side::Supply, Side::Borrow] {
            if storage::read_index_state(env, &market, side).is_none() {
                storage::write_index_state(env, &market, side, &IndexState::fresh(env, now));
            }
        }
        RewardMarketUpdated {
            market,
            is_reward_market: true,
        }
        .publish(env);
    }
    storage::write_reward_markets(env, &members);
}

/// Removes `market` from the reward set, keeping the order of the others.
/// Both indexes are settled at the old speed first so nothing earned before
/// the drop is lost.
pub fn drop_market(env: &Env, market: &Address) {
    if !storage::is_reward_market(env, market) {
        panic_with_error!(env, FlywheelError::NotMember);
    }
    accrual::accrue_market(env, market, None);

    let mut members = storage::read_reward_markets(env);
    if let Some(position) = members.first_index_of(market) {
        members.remove(position);
    }
    storage::write_reward_markets(env, &members);
    storage::write_is_reward_market(env, market, false);
    storage::write_speed(env, market, 0);

    RewardMarketUpdated {
        market: market.clone(),
        is_reward_market: false,
    }
    .publish(env);
}
