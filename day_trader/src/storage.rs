use soroban_sdk::{contracttype, Address, Env};

use crate::error::LedgerError;
use crate::types::{Pool, Position};

/// Storage keys for the contract.
/// Using enum with variants for type-safe storage access.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Owner address (admin controls and treasury withdrawal)
    Owner,
    /// Collateral token contract address
    CollateralToken,
    /// Price aggregator contract address
    Oracle,
    /// Pool accounting singleton
    Pool,
    /// Number of participants with an active position
    ActiveCount,
    /// Dense array entry: participant at a registry index
    ActivePlayer(u32),
    /// Registry index of a participant
    ActiveSlot(Address),
    /// Position record per participant
    Position(Address),
}

/// Scale factor for fixed-point amounts.
/// Uses 7 decimal places to match Stellar/Soroban native token precision.
pub const SCALE_FACTOR: i128 = 10_000_000; // 10^7

/// Seconds a position must stay open before it can be settled.
pub const BET_WINDOW: u64 = 86_400;

/// Fee denominator (per-mille).
pub const FEE_DENOMINATOR: i128 = 1_000;

/// Maximum treasury fee: 100 per-mille = 10%.
pub const MAX_TREASURY_FEE: u32 = 100;

const DAY_IN_LEDGERS: u32 = 17280;
const BUMP_THRESHOLD: u32 = 14 * DAY_IN_LEDGERS;
const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(BUMP_THRESHOLD, BUMP_AMOUNT);
}

pub fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, BUMP_THRESHOLD, BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn read_owner(env: &Env) -> Result<Address, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(LedgerError::StorageCorrupted)
}

pub fn write_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn read_token(env: &Env) -> Result<Address, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::CollateralToken)
        .ok_or(LedgerError::StorageCorrupted)
}

pub fn read_oracle(env: &Env) -> Result<Address, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::Oracle)
        .ok_or(LedgerError::StorageCorrupted)
}

pub fn read_pool(env: &Env) -> Result<Pool, LedgerError> {
    let pool = env
        .storage()
        .instance()
        .get(&DataKey::Pool)
        .ok_or(LedgerError::StorageCorrupted)?;
    extend_instance(env);
    Ok(pool)
}

/// Persist the pool. Refuses to store a pool that breaks conservation.
pub fn write_pool(env: &Env, pool: &Pool) -> Result<(), LedgerError> {
    pool.check_conservation()?;
    env.storage().instance().set(&DataKey::Pool, pool);
    Ok(())
}

pub fn read_position(env: &Env, participant: &Address) -> Option<Position> {
    let key = DataKey::Position(participant.clone());
    let position = env.storage().persistent().get(&key);
    if position.is_some() {
        extend_persistent(env, &key);
    }
    position
}

pub fn write_position(env: &Env, position: &Position) {
    let key = DataKey::Position(position.participant.clone());
    env.storage().persistent().set(&key, position);
    extend_persistent(env, &key);
}
