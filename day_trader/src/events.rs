//! Published contract events.

use soroban_sdk::{symbol_short, Address, Env};

use crate::types::{Direction, Outcome, Position};

pub fn funded(env: &Env, from: &Address, amount: i128, balance: i128) {
    env.events()
        .publish((symbol_short!("fund"), from.clone()), (amount, balance));
}

pub fn position_opened(env: &Env, position: &Position) {
    env.events().publish(
        (symbol_short!("open"), position.participant.clone()),
        (
            position.direction,
            position.stake,
            position.reference_round,
            position.reference_price,
        ),
    );
}

pub fn position_settled(env: &Env, participant: &Address, direction: Direction, outcome: Outcome) {
    env.events().publish(
        (symbol_short!("settle"), participant.clone()),
        (direction, outcome),
    );
}

pub fn sweep_finished(env: &Env, settled: u32, pending: u32) {
    env.events()
        .publish((symbol_short!("sweep"),), (settled, pending));
}

pub fn fee_updated(env: &Env, owner: &Address, fee_per_mille: u32) {
    env.events()
        .publish((symbol_short!("fee"), owner.clone()), fee_per_mille);
}

pub fn paused(env: &Env, owner: &Address, paused: bool) {
    let topic = if paused {
        symbol_short!("pause")
    } else {
        symbol_short!("unpause")
    };
    env.events().publish((topic, owner.clone()), ());
}

pub fn treasury_withdrawn(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("treasury"), owner.clone()), amount);
}

pub fn liquidity_withdrawn(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdraw"), owner.clone()), amount);
}

pub fn ownership_transferred(env: &Env, previous: &Address, owner: &Address) {
    env.events()
        .publish((symbol_short!("owner"), previous.clone()), owner.clone());
}
