// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration State Machines
//!
//! Some provider configuration may only evolve in one direction once it has
//! been stored. Such configuration is modelled as a state, and an update is a
//! transition from the stored state to the requested one.
//!
//! # Shape
//!
//! ```text
//! State → ErrorList                     (validate_state)
//! (State, State) → Output | [Violation] (transition)
//! ```
//!
//! Transitions are pure: the same pair of states always yields the same
//! output or the same violations. A transition reports every rule it breaks,
//! never just the first.
//!
//! # Example
//!
//! ```rust
//! use cim_provider_validation::domain::ImmutableConfig;
//! use cim_provider_validation::path::FieldPath;
//! use cim_provider_validation::state_machine::{retention::RetentionState, StateMachine};
//!
//! let stored = RetentionState::from(Some(&ImmutableConfig::bucket(2, true)));
//! let requested = RetentionState::from(Some(&ImmutableConfig::bucket(1, true)));
//!
//! let errors = stored.validate_update(&requested, &FieldPath::new("immutability"));
//! assert_eq!(errors.len(), 1);
//! ```

pub mod retention;

use crate::errors::{ErrorList, FieldError};
use crate::path::FieldPath;

/// Result of a state transition
pub type TransitionResult<O> = Result<O, Vec<TransitionError>>;

/// A rule broken by a transition, scoped to a field of the state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The requested value may never follow the current one
    #[error("{field}: {detail}")]
    Forbidden { field: &'static str, detail: String },

    /// Business rule prevents the transition
    #[error("{field}: {detail}")]
    BusinessRuleViolation {
        field: &'static str,
        value: String,
        detail: String,
    },
}

impl TransitionError {
    /// Field error rooted at the state's path
    pub fn into_field_error(self, path: &FieldPath) -> FieldError {
        match self {
            TransitionError::Forbidden { field, detail } => {
                FieldError::forbidden(&path.child(field), detail)
            }
            TransitionError::BusinessRuleViolation {
                field,
                value,
                detail,
            } => FieldError::invalid(&path.child(field), value, detail),
        }
    }
}

/// Transition output with metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionOutput {
    /// Warnings generated during transition
    pub warnings: Vec<String>,
}

impl TransitionOutput {
    /// Create output with no warnings
    pub fn ok() -> Self {
        Self::default()
    }

    /// Create output with warnings
    pub fn with_warnings(warnings: Vec<String>) -> Self {
        Self { warnings }
    }
}

/// Trait for configuration state machines
pub trait StateMachine: Sized + Clone {
    /// Output type produced by accepted transitions
    type Output;

    /// Check the rules a single state must satisfy
    fn validate_state(&self, path: &FieldPath) -> ErrorList;

    /// Attempt to move from `self` to `next`
    ///
    /// # Returns
    /// - Ok(output) if the transition is allowed
    /// - Err(violations) with every rule the transition breaks
    fn transition(&self, next: &Self) -> TransitionResult<Self::Output>;

    /// Check if a transition is valid without inspecting its output
    fn can_transition(&self, next: &Self) -> bool {
        self.transition(next).is_ok()
    }

    /// Transition violations as field errors under `path`
    fn validate_transition(&self, next: &Self, path: &FieldPath) -> ErrorList {
        match self.transition(next) {
            Ok(_) => ErrorList::new(),
            Err(violations) => violations
                .into_iter()
                .map(|v| v.into_field_error(path))
                .collect(),
        }
    }

    /// State checks on `next` followed by the transition checks
    fn validate_update(&self, next: &Self, path: &FieldPath) -> ErrorList {
        let mut errors = next.validate_state(path);
        errors.extend(self.validate_transition(next, path));
        errors
    }
}
