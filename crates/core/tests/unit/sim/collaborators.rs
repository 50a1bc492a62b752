//! Injected Collaborators.
//!
//! Policy sources, draw sources and observers plugged into the engine.

use std::cell::RefCell;
use std::rc::Rc;

use cachesim_core::config::ReplacementPolicy;
use cachesim_core::sim::{EvictionRequest, PolicyCallback, Simulator, TracingObserver};
use pretty_assertions::assert_eq;

use crate::common::harness::{direct, fully, run, victims};
use crate::common::mocks::draws::ScriptedDraws;
use crate::common::mocks::observer::RecordingObserver;
use crate::common::mocks::policy::MockPolicy;

// ══════════════════════════════════════════════════════════
// 1. Policy sources
// ══════════════════════════════════════════════════════════

#[test]
fn policy_source_consulted_once_per_capacity_eviction() {
    let mut policy = MockPolicy::new();
    let _ = policy
        .expect_policy_for()
        .withf(|r: &EvictionRequest| r.set_index == 0 && r.residents.len() == 2)
        .times(2)
        .returning(|_| ReplacementPolicy::Fifo);

    let result = Simulator::new(&fully(2, ReplacementPolicy::Lru))
        .unwrap()
        .with_policy_source(policy)
        .run(&[1, 2, 3, 1])
        .unwrap();

    assert_eq!(victims(&result), vec![1, 2]);
    assert_eq!(result.final_state(), &[vec![3, 1]]);
}

#[test]
fn policy_source_never_consulted_without_eviction() {
    let mut policy = MockPolicy::new();
    let _ = policy.expect_policy_for().never();

    // Distinct slots, then hits: nothing is ever evicted.
    let result = Simulator::new(&direct(4))
        .unwrap()
        .with_policy_source(policy)
        .run(&[1, 2, 3, 4, 1, 2])
        .unwrap();

    assert_eq!(result.evictions(), 0);
    assert_eq!(result.hits(), 2);
}

/// A conflict miss in a one-way set has only one candidate victim.
#[test]
fn policy_source_skipped_for_single_way_conflicts() {
    let mut policy = MockPolicy::new();
    let _ = policy.expect_policy_for().never();

    // 1 and 5 share slot 1 of a 4-slot direct-mapped cache.
    let result = Simulator::new(&direct(4))
        .unwrap()
        .with_policy_source(policy)
        .run(&[1, 5, 1])
        .unwrap();

    assert_eq!(victims(&result), vec![1, 5]);
    assert!(result.trace().iter().all(|r| r.policy.is_none()));
    assert_eq!(result.final_state()[1], vec![1]);
}

#[test]
fn policy_source_skipped_for_single_block_fully_associative() {
    let mut policy = MockPolicy::new();
    let _ = policy.expect_policy_for().never();

    let result = Simulator::new(&fully(1, ReplacementPolicy::Random))
        .unwrap()
        .with_policy_source(policy)
        .run(&[1, 2, 3])
        .unwrap();

    assert_eq!(victims(&result), vec![1, 2]);
    assert_eq!(result.final_state(), &[vec![3]]);
}

#[test]
fn callback_can_switch_policy_per_eviction() {
    let choices = [
        ReplacementPolicy::Lru,
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Lru,
    ];
    let requests = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&requests);
    let callback = PolicyCallback::new(move |request: &EvictionRequest| {
        let mut seen = seen.borrow_mut();
        let choice = choices[seen.len()];
        seen.push(request.clone());
        choice
    });

    // After 1,2,3 and a hit on 1: LRU order 2,3,1 and FIFO order 1,2,3.
    // 4 evicts 2 (LRU), 2 evicts 1 (FIFO), 5 evicts 3 (LRU).
    let result = Simulator::new(&fully(3, ReplacementPolicy::Random))
        .unwrap()
        .with_policy_source(callback)
        .run(&[1, 2, 3, 1, 4, 2, 5])
        .unwrap();

    assert_eq!(victims(&result), vec![2, 1, 3]);
    assert_eq!(result.final_state(), &[vec![4, 2, 5]]);

    let applied: Vec<_> = result.trace().iter().filter_map(|r| r.policy).collect();
    assert_eq!(applied, choices.to_vec());

    let requests = requests.borrow();
    let addresses: Vec<u64> = requests.iter().map(|r| r.address).collect();
    assert_eq!(addresses, vec![4, 2, 5]);
    assert_eq!(requests[0].residents, vec![1, 2, 3]);
    assert_eq!(requests[1].residents, vec![1, 3, 4]);
}

#[test]
fn callback_random_uses_injected_draws() {
    let draws = ScriptedDraws::new(&[2, 0, 1]);
    let requested = Rc::clone(&draws.requested);

    let result = Simulator::new(&fully(3, ReplacementPolicy::Lru))
        .unwrap()
        .with_policy_source(PolicyCallback::new(|_: &EvictionRequest| {
            ReplacementPolicy::Random
        }))
        .with_draws(draws)
        .run(&[1, 2, 3, 4, 5, 6])
        .unwrap();

    assert_eq!(victims(&result), vec![3, 1, 4]);
    assert_eq!(result.final_state(), &[vec![2, 5, 6]]);
    assert_eq!(*requested.borrow(), vec![3, 3, 3]);
}

#[test]
fn deterministic_policies_never_draw() {
    let draws = ScriptedDraws::default();
    let requested = Rc::clone(&draws.requested);

    let _ = Simulator::new(&fully(2, ReplacementPolicy::Fifo))
        .unwrap()
        .with_draws(draws)
        .run(&[1, 2, 3, 4, 5])
        .unwrap();

    assert!(requested.borrow().is_empty());
}

#[test]
fn seeded_random_runs_are_reproducible() {
    let mut config = fully(4, ReplacementPolicy::Random);
    config.seed = 42;
    let seq: Vec<u64> = (0..64).map(|i| (i * 7) % 11).collect();
    assert_eq!(run(&config, &seq), run(&config, &seq));
}

// ══════════════════════════════════════════════════════════
// 2. Observers
// ══════════════════════════════════════════════════════════

#[test]
fn observer_sees_every_access_and_completion() {
    let observer = RecordingObserver::default();
    let records = Rc::clone(&observer.records);
    let completions = Rc::clone(&observer.completions);

    let result = Simulator::new(&direct(2))
        .unwrap()
        .with_observer(observer)
        .run(&[1, 3, 1, 1])
        .unwrap();

    assert_eq!(records.borrow().as_slice(), result.trace());
    assert_eq!(*completions.borrow(), vec![(1, 3)]);
}

#[test]
fn tracing_observer_does_not_change_results() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    let config = fully(3, ReplacementPolicy::Lru);
    let seq = [1, 2, 3, 1, 4, 2, 5];
    let observed = tracing::subscriber::with_default(subscriber, || {
        Simulator::new(&config)
            .unwrap()
            .with_observer(TracingObserver)
            .run(&seq)
            .unwrap()
    });

    assert_eq!(observed, run(&config, &seq));
}
