//! Trace-driven cache simulator library.
//!
//! This crate models how a cache responds to a linear sequence of address accesses:
//! 1. **Configuration:** Capacity, mapping strategy, associativity and replacement policy.
//! 2. **Cache:** Address mapper, bounded occupancy sets and per-set eviction trackers.
//! 3. **Policies:** LRU, FIFO and Random victim selection with an injectable draw source.
//! 4. **Simulation:** The engine, per-eviction policy resolution, observers and results.
//! 5. **Reporting:** Summary, per-access report, chart data and final state rendering.

/// Common types (errors and access outcomes).
pub mod common;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// Cache storage (mapper, sets, replacement policies).
pub mod cache;
/// Simulation engine, trace loading and results.
pub mod sim;
/// Text and file renderers for simulation results.
pub mod report;

/// Root configuration type; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Engine type; construct with `Simulator::new` and consume with `run`.
pub use crate::sim::Simulator;
/// Immutable outcome of one run.
pub use crate::sim::SimulationResult;
