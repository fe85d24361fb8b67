// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Retention State Machine
//!
//! The lock only ever tightens and the period only ever grows.

use cim_provider_validation::domain::ImmutableConfig;
use cim_provider_validation::state_machine::retention::RetentionState;
use cim_provider_validation::state_machine::StateMachine;
use cim_provider_validation::{ErrorKind, FieldPath};
use proptest::prelude::*;

fn state(period: i64, locked: bool) -> RetentionState {
    RetentionState::from(Some(&ImmutableConfig::bucket(period, locked)))
}

fn path() -> FieldPath {
    FieldPath::new("immutability")
}

proptest! {
    /// Property: a locked policy is never unlocked, whatever the periods
    #[test]
    fn prop_unlock_is_always_rejected(old in 1i64..1000, new in 1i64..1000) {
        let errors = state(old, true).validate_update(&state(new, false), &path());
        prop_assert_eq!(errors.count_kind(ErrorKind::Forbidden), 1);
    }

    /// Property: the retention period never shrinks
    #[test]
    fn prop_period_decrease_is_always_rejected(
        new in 1i64..1000,
        delta in 1i64..1000,
        was_locked in any::<bool>(),
        locked in any::<bool>(),
    ) {
        let errors = state(new + delta, was_locked).validate_transition(&state(new, locked), &path());
        prop_assert_eq!(errors.count_kind(ErrorKind::Invalid), 1);
    }

    /// Property: growing the period is accepted whenever the lock allows it
    #[test]
    fn prop_non_decrease_is_accepted(
        old in 1i64..1000,
        delta in 0i64..1000,
        was_locked in any::<bool>(),
        locked in any::<bool>(),
    ) {
        prop_assume!(!was_locked || locked);
        let errors = state(old, was_locked).validate_update(&state(old + delta, locked), &path());
        prop_assert!(errors.is_empty());
    }

    /// Property: transitions are deterministic
    #[test]
    fn prop_transition_is_deterministic(
        old in 0i64..10,
        new in 0i64..10,
        was_locked in any::<bool>(),
        locked in any::<bool>(),
    ) {
        let from = state(old, was_locked);
        let to = state(new, locked);
        prop_assert_eq!(from.validate_update(&to, &path()), from.validate_update(&to, &path()));
    }
}
