//! Reservation accounting over the pool singleton.
//!
//! Every open position earmarks `2 * stake` of the pool balance: the
//! bettor's own stake plus the same amount borrowed against the pool to
//! cover a possible win. Capital that is neither reserved nor accrued as
//! treasury fee is "free"; half of it is the capacity for new stakes,
//! since a new stake `A` adds `A` to the balance but `2A` to `reserved`.

use crate::error::LedgerError;
use crate::types::Pool;

impl Pool {
    /// Collateral neither reserved for open positions nor owed to the treasury.
    pub fn free_capital(&self) -> i128 {
        let free = self.balance - self.reserved - self.treasury;
        free.max(0)
    }

    /// Largest stake a new position may carry right now.
    pub fn available_capacity(&self) -> i128 {
        self.free_capital() / 2
    }

    /// Inbound value transfer.
    pub fn deposit(&mut self, amount: i128) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Outbound value transfer (payouts and withdrawals).
    pub fn withdraw(&mut self, amount: i128) -> Result<(), LedgerError> {
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        if balance < 0 {
            return Err(LedgerError::InvariantViolated);
        }
        self.balance = balance;
        Ok(())
    }

    /// Earmark the worst-case payout of a stake.
    /// Caller has already checked `stake <= available_capacity()`.
    pub fn reserve(&mut self, stake: i128) -> Result<(), LedgerError> {
        let amount = worst_case(stake)?;
        self.reserved = self
            .reserved
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.check_conservation()
    }

    /// Free the reservation of a settled stake, win or lose.
    pub fn release(&mut self, stake: i128) -> Result<(), LedgerError> {
        let amount = worst_case(stake)?;
        let reserved = self
            .reserved
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        if reserved < 0 {
            return Err(LedgerError::InvariantViolated);
        }
        self.reserved = reserved;
        Ok(())
    }

    /// Move a settlement fee into the treasury.
    pub fn accrue_fee(&mut self, fee: i128) -> Result<(), LedgerError> {
        self.treasury = self
            .treasury
            .checked_add(fee)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// `reserved + treasury <= balance`, with no negative components.
    pub fn check_conservation(&self) -> Result<(), LedgerError> {
        if self.balance < 0 || self.reserved < 0 || self.treasury < 0 {
            return Err(LedgerError::InvariantViolated);
        }
        let committed = self
            .reserved
            .checked_add(self.treasury)
            .ok_or(LedgerError::Overflow)?;
        if committed > self.balance {
            return Err(LedgerError::InvariantViolated);
        }
        Ok(())
    }
}

/// `2 * stake`: what the pool owes if the bettor wins before fees.
pub fn worst_case(stake: i128) -> Result<i128, LedgerError> {
    stake.checked_mul(2).ok_or(LedgerError::Overflow)
}
