#![no_std]

mod accountant;
mod error;
mod events;
mod oracle;
mod registry;
mod settlement;
mod storage;
mod types;

pub use error::LedgerError;
pub use storage::{BET_WINDOW, SCALE_FACTOR};
pub use types::{Direction, Outcome, Pool, Position, RoundData};

use oracle::{AggregatorFeed, PriceFeed};
use soroban_sdk::{contract, contractimpl, panic_with_error, token, Address, Env};
use storage::MAX_TREASURY_FEE;
use types::Observation;

/// Day Trader Wagering Ledger
///
/// Participants stake collateral on whether an oracle price will be higher
/// ("bullish") or lower ("bearish") one bet window after they open. Winners
/// are paid twice their stake minus a treasury fee, out of a shared pool
/// funded by deposits and by losing stakes.
///
/// Key features:
/// - One open position per participant
/// - Each position reserves `2 * stake` of the pool until it settles
/// - Settlement compares the oracle reading after the window to the one at open
/// - Anyone can sweep expired positions to free their reservations
/// - Owner controls the fee, the pause switch and the treasury
#[contract]
pub struct DayTrader;

#[contractimpl]
impl DayTrader {
    /// Constructor: Called automatically on deployment.
    ///
    /// Delegates to initialize() for the actual setup logic.
    pub fn __constructor(
        env: Env,
        owner: Address,
        collateral_token: Address,
        oracle: Address,
        treasury_fee: u32,
    ) {
        if let Err(err) = Self::initialize(env.clone(), owner, collateral_token, oracle, treasury_fee)
        {
            panic_with_error!(&env, err);
        }
    }

    /// Initialize the ledger.
    ///
    /// # Arguments
    /// * `owner` - Address allowed to change the fee, pause, and withdraw the treasury
    /// * `collateral_token` - Token contract stakes and payouts are made in
    /// * `oracle` - Price aggregator contract
    /// * `treasury_fee` - Fee on winnings in per-mille (at most 100 = 10%)
    pub fn initialize(
        env: Env,
        owner: Address,
        collateral_token: Address,
        oracle: Address,
        treasury_fee: u32,
    ) -> Result<(), LedgerError> {
        if storage::is_initialized(&env) {
            return Err(LedgerError::AlreadyInitialized);
        }
        if treasury_fee > MAX_TREASURY_FEE {
            return Err(LedgerError::FeeTooHigh);
        }

        storage::write_owner(&env, &owner);
        env.storage()
            .instance()
            .set(&storage::DataKey::CollateralToken, &collateral_token);
        env.storage()
            .instance()
            .set(&storage::DataKey::Oracle, &oracle);
        storage::write_pool(
            &env,
            &Pool {
                fee_per_mille: treasury_fee,
                ..Pool::default()
            },
        )?;
        storage::extend_instance(&env);

        Ok(())
    }

    /// Deposit collateral into the betting pool.
    ///
    /// # Returns
    /// Pool balance after the deposit
    pub fn fund(env: Env, from: Address, amount: i128) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;

        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }

        from.require_auth();

        let mut pool = storage::read_pool(&env)?;
        pool.deposit(amount)?;

        // Note: token transfer panics on insufficient balance, which rolls
        // back the whole invocation.
        Self::token(&env)?.transfer(&from, &env.current_contract_address(), &amount);
        storage::write_pool(&env, &pool)?;

        events::funded(&env, &from, amount, pool.balance);
        Ok(pool.balance)
    }

    /// Open a position.
    ///
    /// # Arguments
    /// * `participant` - Bettor (must authorize); pays `stake` in collateral
    /// * `direction` - Expected price move
    /// * `stake` - Amount wagered (scaled by 10^7)
    ///
    /// # Returns
    /// The opened position
    pub fn open_position(
        env: Env,
        participant: Address,
        direction: Direction,
        stake: i128,
    ) -> Result<Position, LedgerError> {
        Self::require_initialized(&env)?;

        let mut pool = storage::read_pool(&env)?;
        if pool.paused {
            return Err(LedgerError::Paused);
        }
        if stake <= 0 {
            return Err(LedgerError::ZeroStake);
        }
        if storage::read_position(&env, &participant).is_some_and(|p| p.active) {
            return Err(LedgerError::PositionAlreadyActive);
        }

        // Capacity is measured before this stake joins the pool
        let capacity = pool.available_capacity();
        if capacity == 0 {
            return Err(LedgerError::InsufficientPoolBalance);
        }
        if stake > capacity {
            return Err(LedgerError::StakeExceedsCapacity);
        }

        participant.require_auth();

        let reference = Self::feed(&env)?.latest()?;

        pool.deposit(stake)?;
        pool.reserve(stake)?;

        Self::token(&env)?.transfer(&participant, &env.current_contract_address(), &stake);

        let position = Position {
            participant: participant.clone(),
            direction,
            stake,
            opened_at: env.ledger().timestamp(),
            reference_round: reference.round_id,
            reference_price: reference.price,
            active: true,
        };
        storage::write_position(&env, &position);
        registry::insert(&env, &participant);
        storage::write_pool(&env, &pool)?;

        events::position_opened(&env, &position);
        Ok(position)
    }

    /// Settle the participant's position and report the outcome.
    ///
    /// Losses and ties are returned as outcomes, so the position is cleared
    /// and its reservation released whatever the result.
    pub fn resolve(env: Env, participant: Address) -> Result<Outcome, LedgerError> {
        Self::resolve_active(&env, &participant)
    }

    /// Claim winnings.
    ///
    /// # Returns
    /// Payout after the treasury fee. A lost or tied position fails with
    /// `NoWinOrNoBet`; since a failed call leaves no trace, such a position
    /// stays open until `resolve` or `close_expired_positions` clears it.
    pub fn claim_reward(env: Env, participant: Address) -> Result<i128, LedgerError> {
        let outcome = Self::resolve_active(&env, &participant)?;
        settlement::into_payout(outcome)
    }

    /// Settle every active position whose window has elapsed and whose
    /// oracle reading is fresh enough. Others are left untouched.
    ///
    /// Callable by anyone, including while paused.
    ///
    /// # Returns
    /// Number of positions settled
    pub fn close_expired_positions(env: Env) -> Result<u32, LedgerError> {
        Self::require_initialized(&env)?;

        // No reading means nothing is eligible
        let latest = match Self::feed(&env)?.latest() {
            Ok(latest) => latest,
            Err(_) => {
                events::sweep_finished(&env, 0, registry::len(&env));
                return Ok(0);
            }
        };

        let now = env.ledger().timestamp();
        let mut pool = storage::read_pool(&env)?;
        let mut settled: u32 = 0;

        // Settling swaps the last entry into slot `index`, so only advance
        // past entries that stay.
        let mut index: u32 = 0;
        while let Some(participant) = registry::get(&env, index) {
            let eligible = storage::read_position(&env, &participant)
                .filter(|position| settlement::ensure_eligible(position, now, &latest).is_ok());
            let Some(position) = eligible else {
                index += 1;
                continue;
            };
            Self::settle_position(&env, &mut pool, position, now, &latest)?;
            settled += 1;
        }

        storage::write_pool(&env, &pool)?;

        events::sweep_finished(&env, settled, registry::len(&env));
        Ok(settled)
    }

    // --- Admin ---

    /// Update the treasury fee (owner only).
    ///
    /// # Arguments
    /// * `owner` - Must match the stored owner
    /// * `treasury_fee` - New fee in per-mille, at most 100
    pub fn set_fee(env: Env, owner: Address, treasury_fee: u32) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &owner)?;
        owner.require_auth();

        if treasury_fee > MAX_TREASURY_FEE {
            return Err(LedgerError::FeeTooHigh);
        }

        let mut pool = storage::read_pool(&env)?;
        pool.fee_per_mille = treasury_fee;
        storage::write_pool(&env, &pool)?;

        events::fee_updated(&env, &owner, treasury_fee);
        Ok(())
    }

    /// Withdraw accrued fees to the owner (owner only).
    ///
    /// # Returns
    /// Amount withdrawn
    pub fn withdraw_treasury(env: Env, owner: Address) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &owner)?;
        owner.require_auth();

        let mut pool = storage::read_pool(&env)?;
        let amount = pool.treasury;
        if amount == 0 {
            return Err(LedgerError::TreasuryEmpty);
        }

        pool.withdraw(amount)?;
        pool.treasury = 0;
        storage::write_pool(&env, &pool)?;

        Self::token(&env)?.transfer(&env.current_contract_address(), &owner, &amount);

        events::treasury_withdrawn(&env, &owner, amount);
        Ok(amount)
    }

    /// Withdraw unreserved pool capital to the owner (owner only).
    ///
    /// Only capital that is neither reserved for open positions nor owed to
    /// the treasury can leave.
    pub fn withdraw_liquidity(env: Env, owner: Address, amount: i128) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &owner)?;
        owner.require_auth();

        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let mut pool = storage::read_pool(&env)?;
        if amount > pool.free_capital() {
            return Err(LedgerError::InsufficientPoolBalance);
        }

        pool.withdraw(amount)?;
        storage::write_pool(&env, &pool)?;

        Self::token(&env)?.transfer(&env.current_contract_address(), &owner, &amount);

        events::liquidity_withdrawn(&env, &owner, amount);
        Ok(pool.balance)
    }

    /// Stop new positions from being opened (owner only).
    /// Settlement and sweeps keep working.
    pub fn pause(env: Env, owner: Address) -> Result<(), LedgerError> {
        Self::set_paused(&env, &owner, true)
    }

    /// Allow new positions again (owner only).
    pub fn unpause(env: Env, owner: Address) -> Result<(), LedgerError> {
        Self::set_paused(&env, &owner, false)
    }

    /// Hand over ownership (owner only).
    pub fn transfer_ownership(env: Env, owner: Address, new_owner: Address) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &owner)?;
        owner.require_auth();

        storage::write_owner(&env, &new_owner);

        events::ownership_transferred(&env, &owner, &new_owner);
        Ok(())
    }

    // --- Queries ---

    /// Largest stake that can be opened right now.
    pub fn max_bet_amount(env: Env) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        Ok(storage::read_pool(&env)?.available_capacity())
    }

    /// Sum of `2 * stake` over all active positions.
    pub fn reserved_balance(env: Env) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        Ok(storage::read_pool(&env)?.reserved)
    }

    /// Fees accrued and not yet withdrawn.
    pub fn treasury_balance(env: Env) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        Ok(storage::read_pool(&env)?.treasury)
    }

    /// Total collateral held.
    pub fn pool_balance(env: Env) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        Ok(storage::read_pool(&env)?.balance)
    }

    /// Current fee in per-mille.
    pub fn treasury_fee(env: Env) -> Result<u32, LedgerError> {
        Self::require_initialized(&env)?;
        Ok(storage::read_pool(&env)?.fee_per_mille)
    }

    pub fn is_paused(env: Env) -> Result<bool, LedgerError> {
        Self::require_initialized(&env)?;
        Ok(storage::read_pool(&env)?.paused)
    }

    /// Full pool accounting snapshot.
    pub fn get_pool(env: Env) -> Result<Pool, LedgerError> {
        Self::require_initialized(&env)?;
        storage::read_pool(&env)
    }

    /// Latest position record of a participant, active or settled.
    pub fn get_position(env: Env, participant: Address) -> Option<Position> {
        storage::read_position(&env, &participant)
    }

    /// Number of active positions.
    pub fn active_count(env: Env) -> u32 {
        registry::len(&env)
    }

    /// Active participant at `index`.
    /// Indices are not stable: settling a position moves the last entry into its slot.
    pub fn active_player(env: Env, index: u32) -> Result<Address, LedgerError> {
        registry::get(&env, index).ok_or(LedgerError::IndexOutOfBounds)
    }

    /// Observation window in seconds.
    pub fn bet_window(_env: Env) -> u64 {
        BET_WINDOW
    }

    /// Price and update time of an oracle round.
    pub fn round_price(env: Env, round_id: u64) -> Result<(i128, u64), LedgerError> {
        Self::require_initialized(&env)?;
        let observation = Self::feed(&env)?.at_round(round_id)?;
        Ok((observation.price, observation.updated_at))
    }

    pub fn get_owner(env: Env) -> Result<Address, LedgerError> {
        Self::require_initialized(&env)?;
        storage::read_owner(&env)
    }

    pub fn get_collateral_token(env: Env) -> Result<Address, LedgerError> {
        Self::require_initialized(&env)?;
        storage::read_token(&env)
    }

    pub fn get_oracle(env: Env) -> Result<Address, LedgerError> {
        Self::require_initialized(&env)?;
        storage::read_oracle(&env)
    }

    // --- Internal helpers ---

    fn require_initialized(env: &Env) -> Result<(), LedgerError> {
        if !storage::is_initialized(env) {
            return Err(LedgerError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), LedgerError> {
        let owner = storage::read_owner(env)?;
        if *caller != owner {
            return Err(LedgerError::NotOwner);
        }
        Ok(())
    }

    fn set_paused(env: &Env, owner: &Address, paused: bool) -> Result<(), LedgerError> {
        Self::require_initialized(env)?;
        Self::require_owner(env, owner)?;
        owner.require_auth();

        let mut pool = storage::read_pool(env)?;
        pool.paused = paused;
        storage::write_pool(env, &pool)?;

        events::paused(env, owner, paused);
        Ok(())
    }

    fn token(env: &Env) -> Result<token::Client<'_>, LedgerError> {
        Ok(token::Client::new(env, &storage::read_token(env)?))
    }

    fn feed(env: &Env) -> Result<AggregatorFeed<'_>, LedgerError> {
        Ok(AggregatorFeed::new(env, &storage::read_oracle(env)?))
    }

    fn resolve_active(env: &Env, participant: &Address) -> Result<Outcome, LedgerError> {
        Self::require_initialized(env)?;
        participant.require_auth();

        let position = storage::read_position(env, participant)
            .filter(|p| p.active)
            .ok_or(LedgerError::NoActiveBet)?;

        let now = env.ledger().timestamp();
        if !settlement::window_elapsed(&position, now) {
            return Err(LedgerError::BetStillOngoing);
        }

        let latest = Self::feed(env)?.latest()?;
        let mut pool = storage::read_pool(env)?;
        let outcome = Self::settle_position(env, &mut pool, position, now, &latest)?;
        storage::write_pool(env, &pool)?;

        Ok(outcome)
    }

    /// Settle one position, persist it, drop it from the registry and pay
    /// out a win. The caller writes `pool` back.
    fn settle_position(
        env: &Env,
        pool: &mut Pool,
        mut position: Position,
        now: u64,
        latest: &Observation,
    ) -> Result<Outcome, LedgerError> {
        let outcome = settlement::settle(pool, &mut position, now, latest)?;

        storage::write_position(env, &position);
        registry::remove(env, &position.participant);

        if let Outcome::Won(payout) = outcome {
            Self::token(env)?.transfer(&env.current_contract_address(), &position.participant, &payout);
        }

        events::position_settled(env, &position.participant, position.direction, outcome);
        Ok(outcome)
    }
}
