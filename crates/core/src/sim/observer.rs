//! Access observers.
//!
//! Observers are side channels attached to a [`Simulator`](super::Simulator):
//! they see every access record and the final result, but cannot influence
//! the run. Logging goes through [`TracingObserver`].

use tracing::{debug, info};

use super::result::{AccessRecord, SimulationResult};

/// Receives every access as it is classified.
pub trait AccessObserver {
    /// Called once per address, after the access has been applied.
    fn on_access(&mut self, record: &AccessRecord);

    /// Called once after the last address.
    fn on_complete(&mut self, _result: &SimulationResult) {}
}

impl<O: AccessObserver + ?Sized> AccessObserver for Box<O> {
    fn on_access(&mut self, record: &AccessRecord) {
        (**self).on_access(record);
    }

    fn on_complete(&mut self, result: &SimulationResult) {
        (**self).on_complete(result);
    }
}

/// Emits a `tracing` event per access and a summary at the end of the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AccessObserver for TracingObserver {
    fn on_access(&mut self, record: &AccessRecord) {
        debug!(
            step = record.step,
            address = record.address,
            set = record.set_index,
            outcome = %record.outcome,
            evicted = ?record.evicted,
            policy = ?record.policy,
            "cache access"
        );
    }

    fn on_complete(&mut self, result: &SimulationResult) {
        info!(
            accesses = result.total(),
            hits = result.hits(),
            misses = result.misses(),
            hit_rate = result.hit_rate(),
            "simulation complete"
        );
    }
}
