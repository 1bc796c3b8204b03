use soroban_sdk::{contracttype, Address};

/// Which way the participant expects the reference price to move.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Bullish,
    Bearish,
}

/// A participant's open wager. At most one per participant is active.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub participant: Address,
    pub direction: Direction,
    /// Stake in collateral base units
    pub stake: i128,
    /// Ledger timestamp at open
    pub opened_at: u64,
    /// Oracle round observed at open
    pub reference_round: u64,
    /// Oracle price observed at open
    pub reference_price: i128,
    pub active: bool,
}

/// Process-wide pool accounting.
///
/// `reserved + treasury <= balance` must hold after every operation.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pool {
    /// Total collateral held by the contract
    pub balance: i128,
    /// Sum of `2 * stake` over all active positions
    pub reserved: i128,
    /// Accrued fees withdrawable by the owner
    pub treasury: i128,
    /// Fee rate in per-mille (0..=100)
    pub fee_per_mille: u32,
    pub paused: bool,
}

/// Aggregator round record as returned by the price feed contract.
///
/// Unknown rounds come back zeroed (`updated_at == 0`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    pub price: i128,
    pub started_at: u64,
    pub updated_at: u64,
}

/// A single oracle reading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Observation {
    pub round_id: u64,
    pub price: i128,
    pub updated_at: u64,
}

/// Result of settling one position.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Bettor won; carries the payout after fee
    Won(i128),
    Lost,
    /// Prices equal; treated as a loss for the bettor
    Tied,
}
