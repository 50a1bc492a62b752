//! Simulator: drives an address trace through the cache.
//!
//! A [`Simulator`] is built from a validated configuration (Idle), consumed by
//! [`Simulator::run`] while it processes every address (Running), and turns
//! into an immutable [`SimulationResult`] (Completed). Because `run` takes the
//! simulator by value, a finished engine can never be re-run; comparing
//! policies means building one simulator per policy.

use tracing::trace;

use crate::cache::Cache;
use crate::cache::policies::{DrawSource, SeededDraws};
use crate::common::error::{SetViolation, SimError};
use crate::common::Outcome;
use crate::config::{CacheConfig, Geometry};

use super::observer::AccessObserver;
use super::policy::{EvictionRequest, FixedPolicy, PolicySource};
use super::result::{AccessRecord, SimulationResult};

/// Top-level simulation engine.
///
/// Owns all mutable state of one run: the sets, their trackers, the policy
/// source, the Random draw source and an optional observer.
pub struct Simulator {
    cache: Cache,
    policy: Box<dyn PolicySource>,
    draws: Box<dyn DrawSource>,
    observer: Option<Box<dyn AccessObserver>>,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("cache", &self.cache)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a simulator for `config`.
    ///
    /// The policy is fixed to `config.policy` and Random draws come from a
    /// [`SeededDraws`] seeded with `config.seed`; both can be swapped with the
    /// `with_*` builders before running.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the configuration fails validation.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        let geometry = config.validate()?;
        trace!(
            capacity = geometry.capacity,
            ways = geometry.associativity,
            sets = geometry.set_count,
            mapping = %geometry.mapping,
            policy = %config.policy,
            "simulator constructed"
        );
        Ok(Self {
            cache: Cache::new(geometry),
            policy: Box::new(FixedPolicy(config.policy)),
            draws: Box::new(SeededDraws::new(config.seed)),
            observer: None,
        })
    }

    /// Replaces the policy source, e.g. with a per-eviction callback.
    #[must_use]
    pub fn with_policy_source(mut self, policy: impl PolicySource + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Replaces the Random policy draw source.
    #[must_use]
    pub fn with_draws(mut self, draws: impl DrawSource + 'static) -> Self {
        self.draws = Box::new(draws);
        self
    }

    /// Attaches an observer that sees every access.
    #[must_use]
    pub fn with_observer(mut self, observer: impl AccessObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Cache layout this simulator was built with.
    pub const fn geometry(&self) -> &Geometry {
        self.cache.geometry()
    }

    /// Processes every address of `sequence` in order and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvariantViolation`] if an occupancy invariant
    /// breaks. This indicates a defect in the engine; no partial result is
    /// returned.
    pub fn run(mut self, sequence: &[u64]) -> Result<SimulationResult, SimError> {
        let mut records = Vec::with_capacity(sequence.len());
        for (step, &addr) in sequence.iter().enumerate() {
            let record = self.step(step, addr)?;
            if let Some(observer) = self.observer.as_mut() {
                observer.on_access(&record);
            }
            records.push(record);
        }

        let result = SimulationResult::new(*self.cache.geometry(), records, self.cache.snapshot());
        if let Some(observer) = self.observer.as_mut() {
            observer.on_complete(&result);
        }
        Ok(result)
    }

    /// Applies one access: map, classify, evict if the set is full, install.
    ///
    /// The policy source is consulted only when a full set has more than one
    /// resident to choose from.
    fn step(&mut self, step: usize, addr: u64) -> Result<AccessRecord, SimError> {
        let set_index = self.cache.set_index(addr);
        let fault = move |violation: SetViolation| SimError::InvariantViolation {
            set: set_index,
            address: addr,
            violation,
        };

        let Some((set, tracker)) = self.cache.partition_mut(set_index) else {
            return Err(fault(SetViolation::UnmappedSet));
        };

        if set.contains(addr) {
            tracker.on_hit(addr);
            return Ok(AccessRecord {
                step,
                address: addr,
                set_index,
                outcome: Outcome::Hit,
                evicted: None,
                policy: None,
            });
        }

        let mut evicted = None;
        let mut applied = None;
        if set.is_full() {
            // A one-way set has a single candidate; no policy is consulted.
            let victim = if set.ways() == 1 {
                set.members()
                    .first()
                    .copied()
                    .ok_or(SetViolation::EmptyVictimPool)
                    .map_err(fault)?
            } else {
                let request = EvictionRequest {
                    address: addr,
                    set_index,
                    residents: set.members().to_vec(),
                };
                let policy = self.policy.policy_for(&request);
                applied = Some(policy);
                tracker
                    .victim(policy, set.members(), self.draws.as_mut())
                    .map_err(fault)?
            };
            set.evict(victim).map_err(fault)?;
            tracker.on_evict(victim).map_err(fault)?;
            evicted = Some(victim);
        }

        set.insert(addr).map_err(fault)?;
        tracker.on_insert(addr);

        Ok(AccessRecord {
            step,
            address: addr,
            set_index,
            outcome: Outcome::Miss,
            evicted,
            policy: applied,
        })
    }
}
