// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validators
//!
//! Pure functions from decoded configuration to an [`ErrorList`](crate::errors::ErrorList).
//! A validator runs every check it owns and never stops at the first
//! failure; the only exception is [`secret::validate_secret`], which reports
//! a single [`CredentialError`].
//!
//! Callers pass the field path the configuration was read from, so errors
//! name the field as the user wrote it.

pub mod backup;
pub mod infrastructure;
pub mod machine_images;
pub mod secret;
pub mod worker;

pub use backup::{
    retention_update_warnings, validate_backup_bucket_config,
    validate_backup_bucket_config_update, validate_credentials_ref,
};
pub use infrastructure::{validate_infrastructure_config, validate_infrastructure_config_update};
pub use machine_images::{
    find_image_for_region, validate_cloud_profile_config, validate_image_mappings,
};
pub use secret::{validate_secret, CredentialError};
pub use worker::{validate_worker_config, validate_workers};
