//! Active position registry.
//!
//! A dense array of participant addresses plus a per-participant slot
//! index. Each array entry is its own storage key, so insert, remove and
//! membership touch a fixed number of entries whatever the registry size.
//! Removal swaps the last entry into the freed slot; order carries no
//! meaning.

use soroban_sdk::{Address, Env};

use crate::storage::{extend_persistent, DataKey};

fn write_len(env: &Env, len: u32) {
    env.storage().instance().set(&DataKey::ActiveCount, &len);
}

fn write_entry(env: &Env, index: u32, participant: &Address) {
    let key = DataKey::ActivePlayer(index);
    env.storage().persistent().set(&key, participant);
    extend_persistent(env, &key);
}

fn write_slot(env: &Env, participant: &Address, slot: u32) {
    let key = DataKey::ActiveSlot(participant.clone());
    env.storage().persistent().set(&key, &slot);
    extend_persistent(env, &key);
}

fn read_slot(env: &Env, participant: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::ActiveSlot(participant.clone()))
}

pub fn len(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ActiveCount)
        .unwrap_or(0)
}

pub fn contains(env: &Env, participant: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::ActiveSlot(participant.clone()))
}

/// Participant at `index`. Indices shift on removal.
pub fn get(env: &Env, index: u32) -> Option<Address> {
    if index >= len(env) {
        return None;
    }
    env.storage().persistent().get(&DataKey::ActivePlayer(index))
}

/// Add a participant. No-op if already present.
pub fn insert(env: &Env, participant: &Address) {
    if contains(env, participant) {
        return;
    }
    let slot = len(env);
    write_entry(env, slot, participant);
    write_slot(env, participant, slot);
    write_len(env, slot + 1);
}

/// Remove a participant by moving the last entry into its slot.
///
/// Returns false if the participant was not registered.
pub fn remove(env: &Env, participant: &Address) -> bool {
    let Some(slot) = read_slot(env, participant) else {
        return false;
    };
    let last = len(env) - 1;
    if slot != last {
        if let Some(moved) = get(env, last) {
            write_entry(env, slot, &moved);
            write_slot(env, &moved, slot);
        }
    }
    env.storage()
        .persistent()
        .remove(&DataKey::ActivePlayer(last));
    env.storage()
        .persistent()
        .remove(&DataKey::ActiveSlot(participant.clone()));
    write_len(env, last);
    true
}
