//! # Cache Storage Tests

/// Occupancy set invariants.
pub mod occupancy;
