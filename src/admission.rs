// Copyright (c) 2025 - Cowboy AI, Inc.
//! Admission Layer
//!
//! Entry points called when a resource is created or updated. Each call
//! decodes the provider-specific sections of the resource, runs the
//! validators that apply, and folds everything they report into one
//! [`ValidationError`].
//!
//! Decoding rules:
//!
//! - a provider section the user wrote that does not decode is a single
//!   `Invalid` error at its path, and the checks that need it are skipped
//! - a cloud profile section that does not decode while validating a shoot
//!   is an `InternalError`, because the user cannot fix it

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ValidatorConfig;
use crate::domain::{
    BackupBucket, BackupBucketConfig, CloudProfile, CloudProfileConfig, InfrastructureConfig,
    SecretData, Shoot, WorkerConfig,
};
use crate::errors::{ErrorList, FieldError, ValidationError, ValidationResult};
use crate::path::FieldPath;
use crate::validation::{
    retention_update_warnings, validate_backup_bucket_config, validate_backup_bucket_config_update,
    validate_cloud_profile_config, validate_credentials_ref, validate_image_mappings,
    validate_infrastructure_config, validate_infrastructure_config_update, validate_secret,
    validate_worker_config, validate_workers,
};

/// Validation entry points for provider resources
///
/// Immutable after construction; share it freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a new shoot against its cloud profile
    pub fn validate_shoot_create(
        &self,
        shoot: &Shoot,
        cloud_profile: &CloudProfile,
    ) -> ValidationResult<()> {
        debug!(shoot = %shoot.name, region = %shoot.region, "Validating shoot creation");
        let errors = self.shoot_errors(shoot, cloud_profile).errors;
        finish("shoot", &shoot.name, errors)
    }

    /// Validate a shoot update: every create check on `new` plus the
    /// rules on how the infrastructure may change
    pub fn validate_shoot_update(
        &self,
        old: &Shoot,
        new: &Shoot,
        cloud_profile: &CloudProfile,
    ) -> ValidationResult<()> {
        debug!(shoot = %new.name, region = %new.region, "Validating shoot update");
        let ShootChecks {
            mut errors,
            infrastructure,
        } = self.shoot_errors(new, cloud_profile);

        if let Some(new_infrastructure) = infrastructure {
            let path = infrastructure_config_path();
            match old.provider.infrastructure_config.as_ref() {
                Some(raw) => match decode::<InfrastructureConfig>(raw) {
                    Ok(old_infrastructure) => errors.extend(
                        validate_infrastructure_config_update(&old_infrastructure, &new_infrastructure),
                    ),
                    Err(e) => errors.push(FieldError::internal(
                        &path,
                        format!("could not decode stored infrastructure config: {}", e),
                    )),
                },
                None => debug!(shoot = %new.name, "No stored infrastructure config, skipping update checks"),
            }
        }

        finish("shoot", &new.name, errors)
    }

    /// Validate the image catalog of a cloud profile
    pub fn validate_cloud_profile(&self, profile: &CloudProfile) -> ValidationResult<()> {
        debug!(cloud_profile = %profile.name, "Validating cloud profile");
        let mut errors = ErrorList::new();
        let path = FieldPath::new("spec").child("providerConfig");

        match profile.provider_config.as_ref() {
            None => errors.push(FieldError::required(
                &path,
                "must provide a provider configuration",
            )),
            Some(raw) => match decode::<CloudProfileConfig>(raw) {
                Err(e) => errors.push(undecodable(&path, e)),
                Ok(catalog) => {
                    let images_path = path.child("machineImages");
                    errors.extend(validate_cloud_profile_config(
                        &catalog,
                        &profile.capabilities,
                        &self.config.supported_architectures,
                        &images_path,
                    ));
                    errors.extend(validate_image_mappings(
                        &profile.machine_images,
                        &catalog,
                        &profile.capabilities,
                        &images_path,
                    ));
                }
            },
        }

        finish("cloud profile", &profile.name, errors)
    }

    /// Validate a new backup bucket
    pub fn validate_backup_bucket_create(&self, bucket: &BackupBucket) -> ValidationResult<()> {
        debug!(bucket = %bucket.name, region = %bucket.region, "Validating backup bucket creation");
        let errors = self.backup_bucket_errors(bucket).errors;
        finish("backup bucket", &bucket.name, errors)
    }

    /// Validate a backup bucket update, including the retention lock rules
    pub fn validate_backup_bucket_update(
        &self,
        old: &BackupBucket,
        new: &BackupBucket,
    ) -> ValidationResult<()> {
        debug!(bucket = %new.name, "Validating backup bucket update");
        let BucketChecks { mut errors, config } = self.backup_bucket_errors(new);

        if let Some(new_config) = config {
            let path = FieldPath::new("spec").child("providerConfig");
            let old_config = match old.provider_config.as_ref() {
                None => Ok(BackupBucketConfig::default()),
                Some(raw) => decode::<BackupBucketConfig>(raw),
            };
            match old_config {
                Ok(old_config) => {
                    errors.extend(validate_backup_bucket_config_update(
                        &old_config,
                        &new_config,
                        &path,
                    ));
                    for warning in retention_update_warnings(&old_config, &new_config) {
                        warn!(bucket = %new.name, "{}", warning);
                    }
                }
                Err(e) => errors.push(FieldError::internal(
                    &path,
                    format!("could not decode stored backup bucket config: {}", e),
                )),
            }
        }

        finish("backup bucket", &new.name, errors)
    }

    /// Validate the credential material of a secret
    pub fn validate_secret(&self, data: &SecretData) -> ValidationResult<()> {
        validate_secret(data).map_err(|e| {
            info!(error = %e, "Secret rejected");
            ValidationError::from(e)
        })
    }

    fn shoot_errors(&self, shoot: &Shoot, cloud_profile: &CloudProfile) -> ShootChecks {
        let mut errors = ErrorList::new();
        let infrastructure_path = infrastructure_config_path();

        let infrastructure = match shoot.provider.infrastructure_config.as_ref() {
            None => {
                errors.push(FieldError::required(
                    &infrastructure_path,
                    "must provide an infrastructure configuration",
                ));
                None
            }
            Some(raw) => match decode::<InfrastructureConfig>(raw) {
                Ok(config) => Some(config),
                Err(e) => {
                    errors.push(undecodable(&infrastructure_path, e));
                    None
                }
            },
        };

        if let Some(infrastructure) = &infrastructure {
            errors.extend(validate_infrastructure_config(
                infrastructure,
                &shoot.networking,
                &shoot.region,
                &self.config.dual_stack_regions,
            ));
        }

        let workers_path = FieldPath::new("spec").child("provider").child("workers");
        for (i, worker) in shoot.provider.workers.iter().enumerate() {
            let Some(raw) = worker.provider_config.as_ref() else {
                continue;
            };
            let path = workers_path.index(i).child("providerConfig");
            match decode::<WorkerConfig>(raw) {
                Ok(config) => errors.extend(validate_worker_config(&config, worker, &path)),
                Err(e) => errors.push(undecodable(&path, e)),
            }
        }

        let catalog_path = FieldPath::new("cloudProfile").child("providerConfig");
        let catalog = match cloud_profile.provider_config.as_ref() {
            None => {
                errors.push(FieldError::internal(
                    &catalog_path,
                    format!("cloud profile {:?} has no provider config", cloud_profile.name),
                ));
                None
            }
            Some(raw) => match decode::<CloudProfileConfig>(raw) {
                Ok(catalog) => Some(catalog),
                Err(e) => {
                    errors.push(FieldError::internal(
                        &catalog_path,
                        format!("could not decode cloud profile config: {}", e),
                    ));
                    None
                }
            },
        };

        if let (Some(infrastructure), Some(catalog)) = (&infrastructure, &catalog) {
            errors.extend(validate_workers(
                &shoot.provider.workers,
                infrastructure,
                catalog,
                &cloud_profile.capabilities,
                &shoot.region,
                &workers_path,
            ));
        }

        ShootChecks {
            errors,
            infrastructure,
        }
    }

    fn backup_bucket_errors(&self, bucket: &BackupBucket) -> BucketChecks {
        let spec = FieldPath::new("spec");
        let mut errors =
            validate_credentials_ref(bucket.credentials_ref.as_ref(), &spec.child("credentialsRef"));

        let path = spec.child("providerConfig");
        let config = match bucket.provider_config.as_ref() {
            None => Some(BackupBucketConfig::default()),
            Some(raw) => match decode::<BackupBucketConfig>(raw) {
                Ok(config) => Some(config),
                Err(e) => {
                    errors.push(undecodable(&path, e));
                    None
                }
            },
        };

        if let Some(config) = &config {
            errors.extend(validate_backup_bucket_config(config, &path));
        }

        BucketChecks { errors, config }
    }
}

/// Errors of the create checks plus the decoded config later checks reuse
struct ShootChecks {
    errors: ErrorList,
    infrastructure: Option<InfrastructureConfig>,
}

struct BucketChecks {
    errors: ErrorList,
    config: Option<BackupBucketConfig>,
}

fn infrastructure_config_path() -> FieldPath {
    FieldPath::new("spec")
        .child("provider")
        .child("infrastructureConfig")
}

fn decode<T: DeserializeOwned>(raw: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(raw)
}

fn undecodable(path: &FieldPath, err: serde_json::Error) -> FieldError {
    FieldError::invalid_field(path, format!("could not decode provider config: {}", err))
}

fn finish(kind: &str, name: &str, errors: ErrorList) -> ValidationResult<()> {
    if errors.is_empty() {
        debug!(kind, name, "Validation passed");
    } else {
        info!(kind, name, errors = errors.len(), "Validation failed");
    }
    errors.into_result()
}
