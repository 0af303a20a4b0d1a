use soroban_sdk::{contractevent, Address, U256};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardMarketUpdated {
    #[topic]
    pub market: Address,
    pub is_reward_market: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpeedUpdated {
    #[topic]
    pub market: Address,
    pub new_speed: u128,
}

/// Emitted for every supplier settlement, including zero-delta ones.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedSupplierReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub supplier: Address,
    pub reward_delta: u128,
    pub supply_index: U256,
}

/// Emitted for every borrower settlement, including zero-delta ones.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedBorrowerReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub borrower: Address,
    pub reward_delta: u128,
    pub borrow_index: U256,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaid {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub remaining_accrued: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateUpdated {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimThresholdUpdated {
    pub old_threshold: u128,
    pub new_threshold: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceOracleUpdated {
    #[topic]
    pub oracle: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminProposed {
    #[topic]
    pub pending_admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminUpdated {
    #[topic]
    pub old_admin: Address,
    #[topic]
    pub admin: Address,
}
