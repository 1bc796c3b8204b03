use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,
    /// Opening positions is paused
    Paused = 3,
    /// Stake must be positive
    ZeroStake = 4,
    /// Participant already has an open position
    PositionAlreadyActive = 5,
    /// Stake is larger than the pool can currently cover
    StakeExceedsCapacity = 6,
    /// Pool has no free capital to bet against
    InsufficientPoolBalance = 7,
    /// Observation window has not elapsed, or the oracle has no fresh reading yet
    BetStillOngoing = 8,
    /// Participant has no open position
    NoActiveBet = 9,
    /// Position settled without a win (loss or tie)
    NoWinOrNoBet = 10,
    /// Oracle has no data for the requested round
    RoundNotFound = 11,
    /// Only the owner can perform this action
    NotOwner = 12,
    /// Treasury fee above the 10% cap
    FeeTooHigh = 13,
    /// No accrued fees to withdraw
    TreasuryEmpty = 14,
    /// Oracle contract could not be invoked
    OracleUnavailable = 15,
    /// Amount must be positive
    InvalidAmount = 16,
    /// Arithmetic overflow
    Overflow = 17,
    /// reserved + treasury would exceed the pool balance
    InvariantViolated = 18,
    /// Critical storage data missing (contract state corrupted)
    StorageCorrupted = 19,
    /// Registry index past the last active participant
    IndexOutOfBounds = 20,
}
