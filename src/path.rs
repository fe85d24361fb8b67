// Copyright (c) 2025 - Cowboy AI, Inc.
//! Field Paths
//!
//! Immutable locators for a value inside a configuration object. Validators
//! receive the path of the value they inspect and derive child paths for
//! nested values, so every error carries the concrete location it was
//! raised at.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Dotted path to a field, e.g. `networks.zones[0].workers`
///
/// # Examples
///
/// ```rust
/// use cim_provider_validation::FieldPath;
///
/// let path = FieldPath::new("networks").child("zones").index(0).child("workers");
/// assert_eq!(path.to_string(), "networks.zones[0].workers");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Create a path rooted at the given field
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(root.into())],
        }
    }

    /// Path to a named field below this one
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.with(Segment::Field(name.into()))
    }

    /// Path to a list element below this one
    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// Path to a map entry below this one
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(Segment::Key(key.into()))
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Key(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}
