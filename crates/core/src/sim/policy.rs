//! Replacement-policy resolution.
//!
//! The engine asks a [`PolicySource`] which policy to apply every time a miss
//! lands in a full set. A [`FixedPolicy`] answers the same policy for the
//! whole run; a [`PolicyCallback`] lets the caller decide per eviction (for
//! example by prompting a user).

use serde::Serialize;

use crate::config::ReplacementPolicy;

/// Context handed to a [`PolicySource`] for one capacity eviction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvictionRequest {
    /// Address whose miss triggered the eviction.
    pub address: u64,
    /// Index of the full set.
    pub set_index: usize,
    /// Current residents of the set, in insertion order.
    pub residents: Vec<u64>,
}

/// Decides the replacement policy for each capacity eviction.
pub trait PolicySource {
    /// Returns the policy to apply to this single eviction.
    fn policy_for(&mut self, request: &EvictionRequest) -> ReplacementPolicy;
}

impl<P: PolicySource + ?Sized> PolicySource for Box<P> {
    fn policy_for(&mut self, request: &EvictionRequest) -> ReplacementPolicy {
        (**self).policy_for(request)
    }
}

/// Policy bound once for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPolicy(pub ReplacementPolicy);

impl PolicySource for FixedPolicy {
    #[inline]
    fn policy_for(&mut self, _request: &EvictionRequest) -> ReplacementPolicy {
        self.0
    }
}

/// Policy chosen per eviction by a caller-supplied closure.
pub struct PolicyCallback<F> {
    callback: F,
}

impl<F> PolicyCallback<F>
where
    F: FnMut(&EvictionRequest) -> ReplacementPolicy,
{
    /// Wraps `callback`; it is invoked once per capacity eviction, never on hits
    /// or on misses into a set with free space.
    pub const fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> std::fmt::Debug for PolicyCallback<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyCallback").finish_non_exhaustive()
    }
}

impl<F> PolicySource for PolicyCallback<F>
where
    F: FnMut(&EvictionRequest) -> ReplacementPolicy,
{
    fn policy_for(&mut self, request: &EvictionRequest) -> ReplacementPolicy {
        (self.callback)(request)
    }
}
