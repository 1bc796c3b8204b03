//! Settlement of a single position against an oracle reading.
//!
//! A position becomes eligible once the observation window has elapsed
//! on the ledger clock *and* the oracle has published a reading at or
//! after the window end. The reading is compared to the reference price
//! captured at open: up favours bullish, down favours bearish, and an
//! unchanged price pays nobody.

use crate::accountant::worst_case;
use crate::error::LedgerError;
use crate::storage::{BET_WINDOW, FEE_DENOMINATOR};
use crate::types::{Direction, Observation, Outcome, Pool, Position};

/// Side that wins given the reference and the settling price, if any.
pub fn winning_side(reference_price: i128, latest_price: i128) -> Option<Direction> {
    if latest_price > reference_price {
        Some(Direction::Bullish)
    } else if latest_price < reference_price {
        Some(Direction::Bearish)
    } else {
        None
    }
}

/// First timestamp at which the position may settle.
pub fn window_end(position: &Position) -> u64 {
    position.opened_at.saturating_add(BET_WINDOW)
}

/// Whether the window has elapsed on the ledger clock alone.
pub fn window_elapsed(position: &Position, now: u64) -> bool {
    now >= window_end(position)
}

/// Check a position can be settled with `latest`.
pub fn ensure_eligible(
    position: &Position,
    now: u64,
    latest: &Observation,
) -> Result<(), LedgerError> {
    if !position.active {
        return Err(LedgerError::NoActiveBet);
    }
    if !window_elapsed(position, now) {
        return Err(LedgerError::BetStillOngoing);
    }
    // Stale oracle data gates settlement just like the clock does
    if latest.updated_at < window_end(position) {
        return Err(LedgerError::BetStillOngoing);
    }
    Ok(())
}

/// Treasury fee on a winning position: `2 * stake * rate / 1000`.
pub fn fee_for(stake: i128, fee_per_mille: u32) -> Result<i128, LedgerError> {
    worst_case(stake)?
        .checked_mul(fee_per_mille as i128)
        .ok_or(LedgerError::Overflow)?
        .checked_div(FEE_DENOMINATOR)
        .ok_or(LedgerError::Overflow)
}

/// Settle `position` against `latest`, updating `pool` and deactivating
/// the position.
///
/// On a win, `2 * stake - fee` leaves the balance and `fee` moves to the
/// treasury. On a loss or tie the balance is untouched. Either way the
/// full `2 * stake` reservation is released. Nothing is modified on error.
pub fn settle(
    pool: &mut Pool,
    position: &mut Position,
    now: u64,
    latest: &Observation,
) -> Result<Outcome, LedgerError> {
    ensure_eligible(position, now, latest)?;

    let mut next = pool.clone();
    let outcome = match winning_side(position.reference_price, latest.price) {
        Some(side) if side == position.direction => {
            let fee = fee_for(position.stake, next.fee_per_mille)?;
            let payout = worst_case(position.stake)?
                .checked_sub(fee)
                .ok_or(LedgerError::Overflow)?;
            next.withdraw(payout)?;
            next.accrue_fee(fee)?;
            Outcome::Won(payout)
        }
        Some(_) => Outcome::Lost,
        None => Outcome::Tied,
    };
    next.release(position.stake)?;
    next.check_conservation()?;

    *pool = next;
    position.active = false;
    Ok(outcome)
}

/// Payout of a winning outcome; anything else is `NoWinOrNoBet`.
pub fn into_payout(outcome: Outcome) -> Result<i128, LedgerError> {
    match outcome {
        Outcome::Won(payout) => Ok(payout),
        Outcome::Lost | Outcome::Tied => Err(LedgerError::NoWinOrNoBet),
    }
}
