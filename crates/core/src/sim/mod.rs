//! Simulation engine and its collaborators.
//!
//! Provides the [`Simulator`] that drives an address trace through the cache,
//! the pluggable policy source and observers it consults, the immutable
//! [`SimulationResult`] it produces, and the trace loader that feeds it.

/// Trace parsing and loading.
pub mod loader;

/// Side-channel observers (logging).
pub mod observer;

/// Per-eviction policy resolution.
pub mod policy;

/// Immutable simulation results.
pub mod result;

/// The simulation engine.
pub mod simulator;

pub use observer::{AccessObserver, TracingObserver};
pub use policy::{EvictionRequest, FixedPolicy, PolicyCallback, PolicySource};
pub use result::{AccessRecord, Location, SimulationResult};
pub use simulator::Simulator;

use crate::common::error::SimError;
use crate::config::CacheConfig;

/// Runs `sequence` through a fresh simulator built from `config`.
///
/// Shorthand for `Simulator::new(config)?.run(sequence)`.
///
/// # Errors
///
/// See [`Simulator::new`] and [`Simulator::run`].
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, Mapping, ReplacementPolicy};
/// use cachesim_core::sim::simulate;
///
/// let config = CacheConfig::new(2, Mapping::FullyAssociative, None, ReplacementPolicy::Fifo);
/// let result = simulate(&config, &[1, 2, 3, 1]).unwrap();
/// assert_eq!(result.misses(), 4);
/// assert_eq!(result.final_state(), &[vec![3, 1]]);
/// ```
pub fn simulate(config: &CacheConfig, sequence: &[u64]) -> Result<SimulationResult, SimError> {
    Simulator::new(config)?.run(sequence)
}
