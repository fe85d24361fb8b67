// Copyright (c) 2025 - Cowboy AI, Inc.
//! Backup Bucket Validation

use crate::domain::{BackupBucketConfig, CredentialsReference};
use crate::errors::{ErrorList, FieldError};
use crate::path::FieldPath;
use crate::state_machine::retention::RetentionState;
use crate::state_machine::StateMachine;

const SECRET_API_VERSION: &str = "v1";
const SECRET_KIND: &str = "Secret";

/// Validate the provider configuration of a new bucket
pub fn validate_backup_bucket_config(config: &BackupBucketConfig, path: &FieldPath) -> ErrorList {
    RetentionState::from(config.immutability.as_ref())
        .validate_state(&path.child("immutability"))
}

/// Validate a change to the provider configuration of a bucket
pub fn validate_backup_bucket_config_update(
    old: &BackupBucketConfig,
    new: &BackupBucketConfig,
    path: &FieldPath,
) -> ErrorList {
    let old_state = RetentionState::from(old.immutability.as_ref());
    let new_state = RetentionState::from(new.immutability.as_ref());
    old_state.validate_update(&new_state, &path.child("immutability"))
}

/// Warnings raised by an accepted retention change
pub fn retention_update_warnings(old: &BackupBucketConfig, new: &BackupBucketConfig) -> Vec<String> {
    let old_state = RetentionState::from(old.immutability.as_ref());
    let new_state = RetentionState::from(new.immutability.as_ref());
    old_state
        .transition(&new_state)
        .map(|output| output.warnings)
        .unwrap_or_default()
}

/// The bucket must reference a core secret holding its credentials
pub fn validate_credentials_ref(
    credentials_ref: Option<&CredentialsReference>,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();

    let Some(credentials_ref) = credentials_ref else {
        errors.push(FieldError::required(path, "must be set"));
        return errors;
    };

    if credentials_ref.api_version != SECRET_API_VERSION || credentials_ref.kind != SECRET_KIND {
        errors.push(FieldError::not_supported(
            path,
            format!("{}/{}", credentials_ref.api_version, credentials_ref.kind),
            &[format!("{}/{}", SECRET_API_VERSION, SECRET_KIND)],
        ));
    }
    if credentials_ref.name.is_empty() {
        errors.push(FieldError::required(&path.child("name"), "must be set"));
    }
    if credentials_ref.namespace.is_empty() {
        errors.push(FieldError::required(&path.child("namespace"), "must be set"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImmutableConfig;
    use crate::errors::ErrorKind;

    fn config(immutability: Option<ImmutableConfig>) -> BackupBucketConfig {
        BackupBucketConfig { immutability }
    }

    fn path() -> FieldPath {
        FieldPath::new("spec").child("providerConfig")
    }

    #[test]
    fn test_bucket_without_retention() {
        assert!(validate_backup_bucket_config(&config(None), &path()).is_empty());
    }

    #[test]
    fn test_bucket_with_bad_retention() {
        let mut immutability = ImmutableConfig::bucket(0, false);
        immutability.retention_type = "object".to_string();
        let errors = validate_backup_bucket_config(&config(Some(immutability)), &path());
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.iter().next().unwrap().path.to_string(),
            "spec.providerConfig.immutability.retentionType"
        );
    }

    #[test]
    fn test_update_rules() {
        let old = config(Some(ImmutableConfig::bucket(2, true)));

        let shorter = config(Some(ImmutableConfig::bucket(1, true)));
        let errors = validate_backup_bucket_config_update(&old, &shorter, &path());
        assert_eq!(errors.len(), 1);
        assert!(errors
            .iter()
            .next()
            .unwrap()
            .detail
            .contains("reducing the retention period from"));

        let longer = config(Some(ImmutableConfig::bucket(3, true)));
        assert!(validate_backup_bucket_config_update(&old, &longer, &path()).is_empty());
    }

    #[test]
    fn test_removing_locked_policy() {
        let old = config(Some(ImmutableConfig::bucket(2, true)));
        let new = config(None);
        assert!(validate_backup_bucket_config_update(&old, &new, &path()).is_empty());
        assert_eq!(retention_update_warnings(&old, &new).len(), 1);
        assert!(retention_update_warnings(&new, &old).is_empty());
    }

    #[test]
    fn test_credentials_ref() {
        let path = FieldPath::new("spec").child("credentialsRef");

        let errors = validate_credentials_ref(None, &path);
        assert_eq!(errors.count_kind(ErrorKind::Required), 1);

        let valid = CredentialsReference::secret("garden", "backup-credentials");
        assert!(validate_credentials_ref(Some(&valid), &path).is_empty());

        let mut config_map = valid.clone();
        config_map.kind = "ConfigMap".to_string();
        let errors = validate_credentials_ref(Some(&config_map), &path);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().kind, ErrorKind::NotSupported);

        let errors = validate_credentials_ref(Some(&CredentialsReference::secret("", "")), &path);
        assert_eq!(errors.count_kind(ErrorKind::Required), 2);
    }
}
