use soroban_sdk::{Address, Env, U256};

use crate::events::{DistributedBorrowerReward, DistributedSupplierReward};
use crate::interfaces;
use crate::math;
use crate::storage::{self, AccrualHint, IndexState, Side};

/// Where `state` would stand at `now` given `speed`, without persisting.
///
/// The height always moves forward, even when nothing is emitted because the
/// speed or the pool is zero; otherwise a dormant stretch would be credited
/// once activity resumes.
pub fn project_index(
    env: &Env,
    market: &Address,
    side: Side,
    state: &IndexState,
    speed: u128,
    now: u32,
    hint: Option<&AccrualHint>,
) -> IndexState {
    if now <= state.height {
        return state.clone();
    }
    let delta_height = (now - state.height) as u128;
    let mut index = state.index.clone();
    if speed > 0 {
        let pool = interfaces::pool_size(env, market, side, hint);
        if pool > 0 {
            let emitted = math::mul(env, delta_height, speed);
            index = index.add(&math::index_delta(env, emitted, pool));
        }
    }
    IndexState { index, height: now }
}

/// Brings a reward market's index for `side` up to the current ledger.
/// Markets outside the reward set keep their state frozen.
pub fn accrue_index(env: &Env, market: &Address, side: Side, hint: Option<&AccrualHint>) {
    if !storage::is_reward_market(env, market) {
        return;
    }
    let now = env.ledger().sequence();
    let state = storage::read_index_state(env, market, side)
        .unwrap_or_else(|| IndexState::fresh(env, now));
    let speed = storage::read_speed(env, market);
    let next = project_index(env, market, side, &state, speed, now, hint);
    if next != state {
        storage::write_index_state(env, market, side, &next);
    }
}

pub fn accrue_market(env: &Env, market: &Address, hint: Option<&AccrualHint>) {
    accrue_index(env, market, Side::Supply, hint);
    accrue_index(env, market, Side::Borrow, hint);
}

/// Reward an account has earned on one side of a market between its
/// checkpoint and `market_index`.
pub fn owed_since_checkpoint(
    env: &Env,
    market: &Address,
    account: &Address,
    side: Side,
    market_index: &U256,
    hint: Option<&AccrualHint>,
) -> u128 {
    let checkpoint = storage::read_checkpoint(env, market, account, side);
    if *market_index <= checkpoint {
        return 0;
    }
    let delta_index = market_index.sub(&checkpoint);
    let share = interfaces::account_share(env, market, account, side, hint);
    if share == 0 {
        return 0;
    }
    math::owed_for_share(env, share, &delta_index)
}

/// Books what `account` earned against the already accrued market index and
/// moves its checkpoint there. Calling it again at the same index books zero.
pub fn distribute(
    env: &Env,
    market: &Address,
    account: &Address,
    side: Side,
    hint: Option<&AccrualHint>,
) -> u128 {
    if !storage::is_reward_market(env, market) {
        return 0;
    }
    let market_index = storage::read_index_state(env, market, side)
        .map(|state| state.index)
        .unwrap_or_else(|| storage::initial_index(env));
    let delta = owed_since_checkpoint(env, market, account, side, &market_index, hint);
    if delta > 0 {
        let accrued = storage::read_accrued(env, account);
        storage::write_accrued(env, account, math::add(env, accrued, delta));
    }
    storage::write_checkpoint(env, market, account, side, &market_index);

    match side {
        Side::Supply => DistributedSupplierReward {
            market: market.clone(),
            supplier: account.clone(),
            reward_delta: delta,
            supply_index: market_index,
        }
        .publish(env),
        Side::Borrow => DistributedBorrowerReward {
            market: market.clone(),
            borrower: account.clone(),
            reward_delta: delta,
            borrow_index: market_index,
        }
        .publish(env),
    }
    delta
}

/// Accrue then distribute, for callers that did not just accrue the index.
pub fn settle(
    env: &Env,
    market: &Address,
    account: &Address,
    side: Side,
    hint: Option<&AccrualHint>,
) -> u128 {
    accrue_index(env, market, side, hint);
    distribute(env, market, account, side, hint)
}

/// Reward a claim over `market` would book for `account` right now.
pub fn pending_in_market(env: &Env, market: &Address, account: &Address) -> u128 {
    if !storage::is_reward_market(env, market) {
        return 0;
    }
    let now = env.ledger().sequence();
    let speed = storage::read_speed(env, market);
    let mut pending = 0u128;
    for side in [Side::Supply, Side::Borrow] {
        let state = storage::read_index_state(env, market, side)
            .unwrap_or_else(|| IndexState::fresh(env, now));
        let projected = project_index(env, market, side, &state, speed, now, None);
        let owed = owed_since_checkpoint(env, market, account, side, &projected.index, None);
        pending = math::add(env, pending, owed);
    }
    pending
}
