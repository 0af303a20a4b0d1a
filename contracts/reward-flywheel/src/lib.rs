#![no_std]

mod accrual;
mod claim;
mod constants;
mod contract;
mod errors;
mod events;
mod interfaces;
mod math;
mod payout;
mod registry;
mod speeds;
mod storage;

pub use constants::{DOUBLE_SCALE_1E36, EXP_SCALE_1E18};
pub use contract::{RewardFlywheel, RewardFlywheelClient};
pub use errors::FlywheelError;
pub use interfaces::{LendingMarketClient, LendingRegistryClient, PriceOracleClient};
pub use storage::{
    AccrualHint, BorrowValueSnapshot, FlywheelConfig, IndexState, MarketState, Side,
};
