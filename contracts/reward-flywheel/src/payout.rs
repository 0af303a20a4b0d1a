use soroban_sdk::{log, token, Address, Env};

use crate::events::RewardPaid;
use crate::math;
use crate::storage;

/// Pays out up to `cap` of the account's accrued reward from the flywheel's
/// own balance and returns the amount sent.
///
/// Nothing moves when the amount is under the claim threshold or the pool
/// cannot cover it; the accrued balance then carries over to a later claim.
pub fn settle_and_pay(env: &Env, account: &Address, cap: u128) -> u128 {
    let accrued = storage::read_accrued(env, account);
    let amount = accrued.min(cap);
    if amount == 0 {
        return 0;
    }
    let threshold = storage::read_claim_threshold(env);
    if amount < threshold {
        log!(env, "payout below threshold", account.clone(), amount, threshold);
        return 0;
    }

    let reward_token = storage::read_reward_token(env);
    let client = token::Client::new(env, &reward_token);
    let pool = env.current_contract_address();
    let amount_i128 = math::to_i128(env, amount);
    let available = client.balance(&pool);
    if available < amount_i128 {
        log!(env, "payout deferred, pool underfunded", account.clone(), amount, available);
        return 0;
    }

    let remaining = math::sub(env, accrued, amount);
    storage::write_accrued(env, account, remaining);
    client.transfer(&pool, account, &amount_i128);

    RewardPaid {
        account: account.clone(),
        amount,
        remaining_accrued: remaining,
    }
    .publish(env);
    amount
}
