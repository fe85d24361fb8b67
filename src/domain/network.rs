// Copyright (c) 2025 - Cowboy AI, Inc.
//! CIDR Value Object and Range Algebra
//!
//! A [`Cidr`] remembers the text it was declared with and the field path it
//! was declared at, so subset and overlap violations can name both sides.
//! Parsing happens once on construction; a `Cidr` is either parsed or carries
//! its parse error.
//!
//! Absent (`None`) and unparseable CIDRs never produce subset or overlap
//! errors. Format problems are reported by [`Cidr::validate_format`] or
//! [`Cidr::validate_canonical`] instead.

use ipnet::IpNet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::errors::{ErrorList, FieldError};
use crate::path::FieldPath;

/// Network parse error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("invalid CIDR address: {0}")]
    InvalidFormat(String),
}

/// Address range declared at a field path
///
/// # Examples
///
/// ```rust
/// use cim_provider_validation::{Cidr, FieldPath};
///
/// let vpc = Cidr::new("10.0.0.0/8", FieldPath::new("networks").child("vpc").child("cidr"));
/// let worker = Cidr::new("10.250.3.0/24", FieldPath::new("workers"));
/// assert!(worker.validate_subset_of([Some(&vpc)]).is_empty());
/// assert!(vpc.overlaps(&worker));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cidr {
    value: String,
    path: FieldPath,
    parsed: Result<IpNet, NetworkError>,
}

impl Cidr {
    pub fn new(value: impl Into<String>, path: FieldPath) -> Self {
        let value = value.into();
        let parsed = Self::parse(&value);
        Self {
            value,
            path,
            parsed,
        }
    }

    /// Build a `Cidr` for an optional field
    pub fn from_optional(value: Option<&str>, path: FieldPath) -> Option<Self> {
        value.map(|v| Self::new(v, path))
    }

    /// Parse `address/prefixLength`
    pub fn parse(text: &str) -> Result<IpNet, NetworkError> {
        IpNet::from_str(text).map_err(|_| NetworkError::InvalidFormat(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The parsed network, if the text was parseable
    pub fn network(&self) -> Option<IpNet> {
        self.parsed.as_ref().ok().copied()
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_ok()
    }

    /// Reports a parse failure as an `Invalid` error
    pub fn validate_format(&self) -> ErrorList {
        match &self.parsed {
            Ok(_) => ErrorList::new(),
            Err(e) => FieldError::invalid(&self.path, &self.value, e.to_string()).into(),
        }
    }

    /// Reports a parse failure or stray host bits below the prefix
    pub fn validate_canonical(&self) -> ErrorList {
        match &self.parsed {
            Err(_) => self.validate_format(),
            Ok(_) if is_canonical(&self.value) => ErrorList::new(),
            Ok(_) => {
                FieldError::invalid(&self.path, &self.value, "must be valid canonical CIDR").into()
            }
        }
    }

    /// One `Invalid` error per superset that does not fully contain this range
    pub fn validate_subset_of<'a, I>(&self, supersets: I) -> ErrorList
    where
        I: IntoIterator<Item = Option<&'a Cidr>>,
    {
        let Some(subset) = self.network() else {
            return ErrorList::new();
        };

        supersets
            .into_iter()
            .flatten()
            .filter_map(|superset| {
                let outer = superset.network()?;
                if outer.contains(&subset) {
                    None
                } else {
                    Some(FieldError::invalid(
                        &self.path,
                        &self.value,
                        format!(
                            "must be a subset of {:?} ({:?})",
                            superset.path.to_string(),
                            superset.value
                        ),
                    ))
                }
            })
            .collect()
    }

    /// Whether the two ranges share any address
    pub fn overlaps(&self, other: &Cidr) -> bool {
        match (self.network(), other.network()) {
            (Some(a), Some(b)) => a.contains(&b) || b.contains(&a),
            _ => false,
        }
    }

    /// One `Invalid` error per range in `others` that intersects this one
    pub fn validate_not_overlapping<'a, I>(&self, others: I) -> ErrorList
    where
        I: IntoIterator<Item = Option<&'a Cidr>>,
    {
        others
            .into_iter()
            .flatten()
            .filter(|other| self.overlaps(other))
            .map(|other| self.overlap_error(other))
            .collect()
    }

    fn same_range(&self, other: &Cidr) -> bool {
        match (self.network(), other.network()) {
            (Some(a), Some(b)) => a.trunc() == b.trunc(),
            _ => false,
        }
    }

    fn overlap_error(&self, other: &Cidr) -> FieldError {
        FieldError::invalid(
            &self.path,
            &self.value,
            format!(
                "must not overlap with {:?} ({:?})",
                other.path.to_string(),
                other.value
            ),
        )
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// True iff the parsed, truncated network renders back to exactly `text`
pub fn is_canonical(text: &str) -> bool {
    Cidr::parse(text)
        .map(|net| net.trunc().to_string() == text)
        .unwrap_or(false)
}

/// Checks every unordered pair; each violation is reported at the later entry.
///
/// With `allow_equal` identical ranges are tolerated, partial overlaps never are.
pub fn validate_pairwise_non_overlapping<'a, I>(cidrs: I, allow_equal: bool) -> ErrorList
where
    I: IntoIterator<Item = Option<&'a Cidr>>,
{
    let cidrs: Vec<&Cidr> = cidrs.into_iter().flatten().collect();
    let mut errors = ErrorList::new();

    for (i, later) in cidrs.iter().enumerate() {
        for earlier in &cidrs[..i] {
            if !later.overlaps(earlier) {
                continue;
            }
            if allow_equal && later.same_range(earlier) {
                continue;
            }
            errors.push(later.overlap_error(earlier));
        }
    }

    errors
}
