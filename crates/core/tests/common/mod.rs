//! Shared helpers for the cache simulator tests.


/// Test doubles for the engine's collaborators.
pub mod mocks;
