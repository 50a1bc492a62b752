//! Common types shared across the cache simulator.
//!
//! This module holds the pieces every other module depends on:
//! 1. **Error Handling:** Configuration, input, simulation and report errors.
//! 2. **Access Outcomes:** The HIT/MISS classification recorded per access.

/// Error types for configuration, input parsing, simulation and reporting.
pub mod error;

/// Per-access hit/miss classification.
pub mod outcome;

pub use error::{ConfigError, InputError, LoadError, ReportError, SetViolation, SimError};
pub use outcome::Outcome;
