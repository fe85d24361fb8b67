// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for provider configuration validation
//!
//! Validators never abort on the first problem. Each check appends
//! [`FieldError`]s to an [`ErrorList`] and the caller folds the complete list
//! into a single [`ValidationError`] once all checks have run.

use std::fmt;
use thiserror::Error;

use crate::path::FieldPath;
use crate::validation::secret::CredentialError;

/// Category of a field error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A mandatory field is absent
    Required,
    /// A present value violates a constraint
    Invalid,
    /// A well-formed value is disallowed in this context
    Forbidden,
    /// A value exceeds its maximum length
    TooLong,
    /// A list exceeds its maximum number of entries
    TooMany,
    /// A value is outside an enumerated allow-list
    NotSupported,
    /// A failure that is not attributable to user input
    InternalError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Required => "Required value",
            ErrorKind::Invalid => "Invalid value",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::TooLong => "Too long",
            ErrorKind::TooMany => "Too many",
            ErrorKind::NotSupported => "Unsupported value",
            ErrorKind::InternalError => "Internal error",
        };
        write!(f, "{}", s)
    }
}

/// A single validation failure scoped to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub path: FieldPath,
    /// Rendering of the offending value, when one exists
    pub value: Option<String>,
    pub detail: String,
}

impl FieldError {
    pub fn required(path: &FieldPath, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Required, path, None, detail)
    }

    pub fn invalid(path: &FieldPath, value: impl fmt::Display, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, path, Some(value.to_string()), detail)
    }

    /// `Invalid` error for a composite value that has no single rendering
    pub fn invalid_field(path: &FieldPath, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, path, None, detail)
    }

    pub fn forbidden(path: &FieldPath, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, path, None, detail)
    }

    pub fn too_long(path: &FieldPath, value: impl fmt::Display, max_length: usize) -> Self {
        Self::new(
            ErrorKind::TooLong,
            path,
            Some(value.to_string()),
            format!("may not be more than {} bytes", max_length),
        )
    }

    pub fn too_many(path: &FieldPath, actual: usize, max: usize) -> Self {
        Self::new(
            ErrorKind::TooMany,
            path,
            Some(actual.to_string()),
            format!("must have at most {} items", max),
        )
    }

    /// Value outside the allow-list; the detail enumerates the supported values
    pub fn not_supported<S: AsRef<str>>(
        path: &FieldPath,
        value: impl fmt::Display,
        supported: &[S],
    ) -> Self {
        let supported = supported
            .iter()
            .map(|s| format!("{:?}", s.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            ErrorKind::NotSupported,
            path,
            Some(value.to_string()),
            format!("supported values: {}", supported),
        )
    }

    pub fn internal(path: &FieldPath, err: impl fmt::Display) -> Self {
        Self::new(ErrorKind::InternalError, path, None, err.to_string())
    }

    fn new(
        kind: ErrorKind,
        path: &FieldPath,
        value: Option<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.clone(),
            value,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)?;
        if let Some(value) = &self.value {
            write!(f, ": {:?}", value)?;
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

/// Ordered accumulation of field errors produced by one validation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Number of errors of the given kind
    pub fn count_kind(&self, kind: ErrorKind) -> usize {
        self.0.iter().filter(|e| e.kind == kind).count()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    /// `Ok(())` for an empty list, otherwise the aggregated error
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Fields(self))
        }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            return write!(f, "{}", self.0[0]);
        }
        write!(f, "[")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        write!(f, "]")
    }
}

impl From<FieldError> for ErrorList {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors returned to callers of the validation engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more field-scoped violations
    #[error("invalid configuration: {0}")]
    Fields(ErrorList),

    /// Credential material is malformed
    #[error("invalid credentials: {0}")]
    Credentials(#[from] CredentialError),
}

impl ValidationError {
    /// Field errors carried by this error, empty for credential failures
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::Fields(list) => &list.0,
            ValidationError::Credentials(_) => &[],
        }
    }
}

impl From<ErrorList> for ValidationError {
    fn from(list: ErrorList) -> Self {
        ValidationError::Fields(list)
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
