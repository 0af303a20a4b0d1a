use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FlywheelError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    UnrecognizedMarket = 4,
    AlreadyMember = 5,
    NotMember = 6,
    ReentrantSpeedRefresh = 7,
    MathOverflow = 8,
    InvalidAmount = 9,
}
