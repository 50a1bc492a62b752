//! Error definitions for the cache simulator.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Invalid cache geometry, rejected before any access runs.
//! 2. **Input Errors:** Malformed addresses in a text-derived trace, with their position,
//!    and trace files that cannot be read.
//! 3. **Simulation Errors:** Broken occupancy invariants inside the engine (defects).
//! 4. **Report Errors:** I/O failures while persisting a report.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache configuration.
///
/// Raised by [`CacheConfig::validate`](crate::config::CacheConfig::validate) and
/// by the `FromStr` impls of the configuration enums. A run never starts when
/// its configuration fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cache must hold at least one block.
    #[error("cache capacity must be at least one block")]
    ZeroCapacity,

    /// Set-associative mapping was selected without an associativity.
    #[error("set-associative mapping requires an associativity")]
    MissingAssociativity,

    /// Associativity lies outside `[1, capacity]`.
    #[error("associativity {associativity} is outside [1, {capacity}]")]
    AssociativityOutOfRange {
        /// Requested blocks per set.
        associativity: usize,
        /// Total cache capacity in blocks.
        capacity: usize,
    },

    /// Associativity does not evenly divide the capacity.
    #[error("associativity {associativity} does not divide capacity {capacity}")]
    AssociativityNotDivisor {
        /// Requested blocks per set.
        associativity: usize,
        /// Total cache capacity in blocks.
        capacity: usize,
    },

    /// A mapping name could not be parsed.
    #[error("unknown mapping `{0}` (expected direct, fully-associative or set-associative)")]
    UnknownMapping(String),

    /// A replacement policy name could not be parsed.
    #[error("unknown replacement policy `{0}` (expected lru, fifo or random)")]
    UnknownPolicy(String),
}

/// Malformed address in a text-derived access sequence.
///
/// Positions are 0-based indices into the comma/whitespace separated token list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The sequence contained no addresses at all.
    #[error("address sequence is empty")]
    Empty,

    /// Two separators with nothing between them (e.g. `1,,2`).
    #[error("missing address at position {position}")]
    MissingToken {
        /// Index of the empty token.
        position: usize,
    },

    /// A negative integer was supplied.
    #[error("negative address `{token}` at position {position}")]
    Negative {
        /// The offending text.
        token: String,
        /// Index of the offending token.
        position: usize,
    },

    /// The token is not an integer.
    #[error("malformed address `{token}` at position {position}")]
    Malformed {
        /// The offending text.
        token: String,
        /// Index of the offending token.
        position: usize,
    },

    /// The integer does not fit in 64 bits.
    #[error("address `{token}` at position {position} does not fit in 64 bits")]
    Overflow {
        /// The offending text.
        token: String,
        /// Index of the offending token.
        position: usize,
    },
}

/// Failure while loading a trace file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read trace file {}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not a valid address sequence.
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Occupancy-set precondition that was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SetViolation {
    /// Insert attempted while the set already holds `associativity` blocks.
    #[error("insert into a full set")]
    InsertIntoFullSet,
    /// Insert attempted for an address that is already resident.
    #[error("insert of an already resident address")]
    DuplicateInsert,
    /// Evict attempted for an address that is not resident.
    #[error("evict of a non-resident address")]
    EvictNonMember,
    /// A victim was requested from a set with no residents.
    #[error("victim requested from an empty set")]
    EmptyVictimPool,
    /// An address mapped to a set index outside the cache.
    #[error("address mapped outside the cache")]
    UnmappedSet,
}

/// Errors surfaced by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The configuration failed validation; no access was processed.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// An internal occupancy invariant was broken. This is a defect in the
    /// engine, never a property of the input trace.
    #[error("invariant violated in set {set} at address {address}")]
    InvariantViolation {
        /// Index of the set whose invariant broke.
        set: usize,
        /// Address being processed when the violation occurred.
        address: u64,
        /// The rule that was broken.
        #[source]
        violation: SetViolation,
    },
}

/// Failure while persisting a report to disk.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report file or its parent directory could not be written.
    #[error("failed to write report to {}", path.display())]
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
