// Copyright (c) 2025 - Cowboy AI, Inc.
//! Backup Retention State Machine
//!
//! # States
//!
//! - Unset: the bucket carries no retention policy
//! - Configured: a policy with a type, a period in days and a lock flag
//!
//! # Transitions
//!
//! - Unset → anything: allowed
//! - Configured → Configured: the lock may not be released and the period
//!   may not shrink; both are reported when both happen
//! - Configured → Unset: allowed, with a warning when the policy was locked
//!
//! Dropping a locked policy entirely is a known gap in the lock rules. It is
//! accepted so existing buckets can be reconfigured, and the output carries a
//! warning for the caller to surface.

use super::{StateMachine, TransitionError, TransitionOutput, TransitionResult};
use crate::domain::{ImmutableConfig, RETENTION_TYPE_BUCKET};
use crate::errors::{ErrorList, FieldError};
use crate::path::FieldPath;

/// Retention policy of a backup bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetentionState {
    Unset,
    Configured {
        retention_type: String,
        period_days: i64,
        locked: bool,
    },
}

impl RetentionState {
    pub fn is_locked(&self) -> bool {
        matches!(self, RetentionState::Configured { locked: true, .. })
    }
}

impl From<Option<&ImmutableConfig>> for RetentionState {
    fn from(config: Option<&ImmutableConfig>) -> Self {
        match config {
            None => RetentionState::Unset,
            Some(config) => RetentionState::Configured {
                retention_type: config.retention_type.clone(),
                period_days: config.retention_period,
                locked: config.locked,
            },
        }
    }
}

impl StateMachine for RetentionState {
    type Output = TransitionOutput;

    fn validate_state(&self, path: &FieldPath) -> ErrorList {
        let mut errors = ErrorList::new();

        if let RetentionState::Configured {
            retention_type,
            period_days,
            ..
        } = self
        {
            if retention_type != RETENTION_TYPE_BUCKET {
                errors.push(FieldError::invalid(
                    &path.child("retentionType"),
                    retention_type,
                    format!("must be '{}'", RETENTION_TYPE_BUCKET),
                ));
            }
            if *period_days < 1 {
                errors.push(FieldError::invalid(
                    &path.child("retentionPeriod"),
                    period_days,
                    "can't be less than 1 day",
                ));
            }
        }

        errors
    }

    fn transition(&self, next: &Self) -> TransitionResult<Self::Output> {
        use RetentionState::*;

        match (self, next) {
            (Unset, _) => Ok(TransitionOutput::ok()),

            (Configured { locked: true, .. }, Unset) => Ok(TransitionOutput::with_warnings(vec![
                "locked immutable retention policy is being removed".to_string(),
            ])),
            (Configured { .. }, Unset) => Ok(TransitionOutput::ok()),

            (
                Configured {
                    period_days: old_period,
                    locked: was_locked,
                    ..
                },
                Configured {
                    period_days: new_period,
                    locked,
                    ..
                },
            ) => {
                let mut violations = Vec::new();

                if *was_locked && !*locked {
                    violations.push(TransitionError::Forbidden {
                        field: "locked",
                        detail: "immutable retention policy lock cannot be unlocked once it is locked"
                            .to_string(),
                    });
                }
                if new_period < old_period {
                    violations.push(TransitionError::BusinessRuleViolation {
                        field: "retentionPeriod",
                        value: new_period.to_string(),
                        detail: format!(
                            "reducing the retention period from {} to {} is not allowed",
                            old_period, new_period
                        ),
                    });
                }

                if violations.is_empty() {
                    Ok(TransitionOutput::ok())
                } else {
                    Err(violations)
                }
            }
        }
    }
}
