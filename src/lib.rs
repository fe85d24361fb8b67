// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider configuration validation for the Composable Information Machine
//!
//! This crate checks cloud provider configuration before it is accepted:
//! network topology, machine image catalogs, backup retention policies,
//! worker pools and credential secrets. Validators are pure functions that
//! collect every problem as a field-scoped error; the [`admission`] layer
//! decodes raw provider sections and folds the results into one
//! [`ValidationError`].

pub mod admission;
pub mod config;
pub mod domain;
pub mod errors;
pub mod path;
pub mod state_machine;
pub mod validation;

// Re-export commonly used types
pub use admission::Validator;
pub use config::ValidatorConfig;
pub use domain::Cidr;
pub use errors::{ErrorKind, ErrorList, FieldError, ValidationError, ValidationResult};
pub use path::FieldPath;
