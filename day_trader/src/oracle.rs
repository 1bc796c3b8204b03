//! Price oracle adapter.
//!
//! The ledger consumes an AggregatorV3-shaped price feed contract. The
//! contract-facing interface is [`Aggregator`]; settlement code only sees
//! the [`PriceFeed`] trait so it can run against any source of readings.

use soroban_sdk::{contractclient, Address, Env};

use crate::error::LedgerError;
use crate::types::{Observation, RoundData};

/// Interface of the external price aggregator contract.
#[contractclient(name = "AggregatorClient")]
pub trait Aggregator {
    fn latest_round_data(env: Env) -> RoundData;
    fn get_round_data(env: Env, round_id: u64) -> RoundData;
}

/// Source of price readings.
pub trait PriceFeed {
    /// Most recent round.
    fn latest(&self) -> Result<Observation, LedgerError>;
    /// A specific round. Rounds beyond the latest are `RoundNotFound`.
    fn at_round(&self, round_id: u64) -> Result<Observation, LedgerError>;
}

/// [`PriceFeed`] backed by an aggregator contract.
pub struct AggregatorFeed<'a> {
    client: AggregatorClient<'a>,
}

impl<'a> AggregatorFeed<'a> {
    pub fn new(env: &Env, address: &Address) -> Self {
        Self {
            client: AggregatorClient::new(env, address),
        }
    }
}

impl PriceFeed for AggregatorFeed<'_> {
    fn latest(&self) -> Result<Observation, LedgerError> {
        // A trapping or missing feed fails the calling operation
        match self.client.try_latest_round_data() {
            Ok(Ok(data)) => observation(data),
            _ => Err(LedgerError::OracleUnavailable),
        }
    }

    fn at_round(&self, round_id: u64) -> Result<Observation, LedgerError> {
        match self.client.try_get_round_data(&round_id) {
            Ok(Ok(data)) => observation(data),
            _ => Err(LedgerError::OracleUnavailable),
        }
    }
}

/// Unknown rounds are reported as zeroed records.
fn observation(data: RoundData) -> Result<Observation, LedgerError> {
    if data.updated_at == 0 {
        return Err(LedgerError::RoundNotFound);
    }
    Ok(Observation {
        round_id: data.round_id,
        price: data.price,
        updated_at: data.updated_at,
    })
}
