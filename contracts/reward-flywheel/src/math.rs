//! Scaled-integer helpers. Values are either "exp" (1e18) or "double" (1e36)
//! scaled; every product goes through a 256-bit intermediate and every
//! division truncates.

use soroban_sdk::{panic_with_error, Env, U256};

use crate::constants::{DOUBLE_SCALE_1E36, EXP_SCALE_1E18};
use crate::errors::FlywheelError;

/// `a * b / denominator`, truncating. Panics with `MathOverflow` when the
/// quotient does not fit in a `u128` or the denominator is zero.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic_with_error!(env, FlywheelError::MathOverflow);
    }
    if a == 0 || b == 0 {
        return 0;
    }
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    product
        .div(&U256::from_u128(env, denominator))
        .to_u128()
        .unwrap_or_else(|| panic_with_error!(env, FlywheelError::MathOverflow))
}

/// exp-scaled `a * b`.
pub fn mul_exp(env: &Env, a: u128, b_exp: u128) -> u128 {
    mul_div(env, a, b_exp, EXP_SCALE_1E18)
}

/// `a / b` as an exp-scaled ratio.
pub fn div_exp(env: &Env, a: u128, b: u128) -> u128 {
    mul_div(env, a, EXP_SCALE_1E18, b)
}

/// `a / b` as a double-scaled ratio.
pub fn fraction_double(env: &Env, a: u128, b: u128) -> u128 {
    mul_div(env, a, DOUBLE_SCALE_1E36, b)
}

/// `a * ratio` where `ratio` is double-scaled.
pub fn mul_double(env: &Env, a: u128, ratio_double: u128) -> u128 {
    mul_div(env, a, ratio_double, DOUBLE_SCALE_1E36)
}

/// Index growth for `emitted` reward spread over `pool`, double-scaled.
/// Kept at 256 bits: a small pool pushes the quotient far past `u128`.
pub fn index_delta(env: &Env, emitted: u128, pool: u128) -> U256 {
    if pool == 0 {
        panic_with_error!(env, FlywheelError::MathOverflow);
    }
    U256::from_u128(env, emitted)
        .mul(&U256::from_u128(env, DOUBLE_SCALE_1E36))
        .div(&U256::from_u128(env, pool))
}

/// `share * delta_index / 1e36`, narrowed back to a reward amount.
pub fn owed_for_share(env: &Env, share: u128, delta_index: &U256) -> u128 {
    U256::from_u128(env, share)
        .mul(delta_index)
        .div(&U256::from_u128(env, DOUBLE_SCALE_1E36))
        .to_u128()
        .unwrap_or_else(|| panic_with_error!(env, FlywheelError::MathOverflow))
}

pub fn add(env: &Env, a: u128, b: u128) -> u128 {
    a.checked_add(b)
        .unwrap_or_else(|| panic_with_error!(env, FlywheelError::MathOverflow))
}

pub fn sub(env: &Env, a: u128, b: u128) -> u128 {
    a.checked_sub(b)
        .unwrap_or_else(|| panic_with_error!(env, FlywheelError::MathOverflow))
}

pub fn mul(env: &Env, a: u128, b: u128) -> u128 {
    a.checked_mul(b)
        .unwrap_or_else(|| panic_with_error!(env, FlywheelError::MathOverflow))
}

pub fn to_i128(env: &Env, amount: u128) -> i128 {
    i128::try_from(amount).unwrap_or_else(|_| panic_with_error!(env, FlywheelError::InvalidAmount))
}
