pub const EXP_SCALE_1E18: u128 = 1_000_000_000_000_000_000u128; // speeds, prices, rewards
pub const DOUBLE_SCALE_1E36: u128 = EXP_SCALE_1E18 * EXP_SCALE_1E18; // reward indexes

pub const TTL_THRESHOLD: u32 = 100_000_000;
pub const TTL_EXTEND_TO: u32 = 200_000_000;
