// Copyright (c) 2025 - Cowboy AI, Inc.
//! Secret Credential Validation
//!
//! Unlike the configuration validators this check stops at the first
//! problem: a secret either carries usable credentials or it does not.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::domain::{SecretData, ACCESS_KEY_ID, ACCESS_KEY_SECRET};

const ACCESS_KEY_ID_MIN_LENGTH: usize = 16;
const ACCESS_KEY_ID_MAX_LENGTH: usize = 128;
const ACCESS_KEY_SECRET_MIN_LENGTH: usize = 30;

static ACCESS_KEY_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-zA-Z._=]+$").expect("access key id pattern must compile")
});

/// Malformed credential material
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("missing {0:?} field in secret")]
    MissingField(&'static str),

    #[error("field {field:?} in secret must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },

    #[error("field {field:?} in secret must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },

    #[error("field {0:?} in secret must only contain alphanumeric characters, '.', '_' and '='")]
    InvalidCharacters(&'static str),

    #[error("field {0:?} in secret must not contain leading or trailing new lines")]
    SurroundingNewlines(&'static str),
}

/// Check the access key pair stored in a secret
pub fn validate_secret(data: &SecretData) -> Result<(), CredentialError> {
    let access_key_id = data
        .get(ACCESS_KEY_ID)
        .ok_or(CredentialError::MissingField(ACCESS_KEY_ID))?;
    let access_key_id = String::from_utf8_lossy(access_key_id);

    let length = access_key_id.chars().count();
    if length < ACCESS_KEY_ID_MIN_LENGTH {
        return Err(CredentialError::TooShort {
            field: ACCESS_KEY_ID,
            min: ACCESS_KEY_ID_MIN_LENGTH,
        });
    }
    if length > ACCESS_KEY_ID_MAX_LENGTH {
        return Err(CredentialError::TooLong {
            field: ACCESS_KEY_ID,
            max: ACCESS_KEY_ID_MAX_LENGTH,
        });
    }
    if !ACCESS_KEY_ID_PATTERN.is_match(&access_key_id) {
        return Err(CredentialError::InvalidCharacters(ACCESS_KEY_ID));
    }

    let access_key_secret = data
        .get(ACCESS_KEY_SECRET)
        .ok_or(CredentialError::MissingField(ACCESS_KEY_SECRET))?;
    let access_key_secret = String::from_utf8_lossy(access_key_secret);

    if access_key_secret.chars().count() < ACCESS_KEY_SECRET_MIN_LENGTH {
        return Err(CredentialError::TooShort {
            field: ACCESS_KEY_SECRET,
            min: ACCESS_KEY_SECRET_MIN_LENGTH,
        });
    }
    if access_key_secret.trim_matches(['\n', '\r']) != access_key_secret {
        return Err(CredentialError::SurroundingNewlines(ACCESS_KEY_SECRET));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(id: &str, key: &str) -> SecretData {
        let mut data = SecretData::new();
        data.insert(ACCESS_KEY_ID.to_string(), id.as_bytes().to_vec());
        data.insert(ACCESS_KEY_SECRET.to_string(), key.as_bytes().to_vec());
        data
    }

    #[test]
    fn test_valid_secret() {
        assert_eq!(validate_secret(&secret(&"a".repeat(16), &"b".repeat(30))), Ok(()));
        assert_eq!(
            validate_secret(&secret("KEY.EXAMPLE_ID=01", &"b".repeat(40))),
            Ok(())
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_secret(&SecretData::new()),
            Err(CredentialError::MissingField(ACCESS_KEY_ID))
        );

        let mut data = secret(&"a".repeat(16), "");
        data.remove(ACCESS_KEY_SECRET);
        assert_eq!(
            validate_secret(&data),
            Err(CredentialError::MissingField(ACCESS_KEY_SECRET))
        );
    }

    #[test]
    fn test_secret_data_keys() {
        let mut data = SecretData::new();
        data.insert("accessKeyID".to_string(), "a".repeat(16).into_bytes());
        data.insert("accessKeySecret".to_string(), "b".repeat(30).into_bytes());
        assert_eq!(validate_secret(&data), Ok(()));

        let mut data = SecretData::new();
        data.insert("accessKeyID".to_string(), "a".repeat(16).into_bytes());
        data.insert("secretAccessKey".to_string(), "b".repeat(30).into_bytes());
        assert_eq!(
            validate_secret(&data),
            Err(CredentialError::MissingField("accessKeySecret"))
        );
    }

    #[test]
    fn test_access_key_id_length() {
        assert!(matches!(
            validate_secret(&secret(&"a".repeat(15), &"b".repeat(30))),
            Err(CredentialError::TooShort { .. })
        ));
        assert!(matches!(
            validate_secret(&secret(&"a".repeat(129), &"b".repeat(30))),
            Err(CredentialError::TooLong { .. })
        ));
        assert!(validate_secret(&secret(&"a".repeat(128), &"b".repeat(30))).is_ok());
    }

    #[test]
    fn test_access_key_id_characters() {
        assert_eq!(
            validate_secret(&secret("aaaaaaaa-aaaaaaaa", &"b".repeat(30))),
            Err(CredentialError::InvalidCharacters(ACCESS_KEY_ID))
        );
    }

    #[test]
    fn test_access_key_secret_length() {
        assert_eq!(
            validate_secret(&secret(&"a".repeat(16), &"b".repeat(29))),
            Err(CredentialError::TooShort {
                field: ACCESS_KEY_SECRET,
                min: 30
            })
        );
    }

    #[test]
    fn test_access_key_secret_newlines() {
        let err = validate_secret(&secret(&"a".repeat(16), &format!("{}\n", "b".repeat(30))))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "field \"accessKeySecret\" in secret must not contain leading or trailing new lines"
        );

        assert!(validate_secret(&secret(&"a".repeat(16), &format!("\r{}", "b".repeat(30)))).is_err());
    }

    #[test]
    fn test_first_failure_wins() {
        // both fields are bad; only the access key id is reported
        assert_eq!(
            validate_secret(&secret("x", "y")),
            Err(CredentialError::TooShort {
                field: ACCESS_KEY_ID,
                min: 16
            })
        );
    }
}
