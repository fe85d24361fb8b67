// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Capabilities
//!
//! A capability set maps a named dimension (e.g. `architecture`) to the values
//! an image or machine supports. Raw sets are never compared directly: both
//! sides are first default-filled against the profile's capability
//! definitions, producing [`DefaultedCapabilities`], which is the only type
//! with an equality relation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Name of the architecture capability
pub const ARCHITECTURE: &str = "architecture";

/// Schema entry: a capability and every value it may take
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CapabilityDefinition {
    pub name: String,

    #[serde(default)]
    pub values: Vec<String>,
}

/// Capability set as declared by the user
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Capabilities(BTreeMap<String, Vec<String>>);

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.0
            .insert(name.into(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fill every defined capability the set leaves out with all of its values
    ///
    /// Capabilities without a definition are dropped.
    pub fn with_defaults(&self, definitions: &[CapabilityDefinition]) -> DefaultedCapabilities {
        let filled = definitions
            .iter()
            .map(|definition| {
                let values: BTreeSet<String> = match self.0.get(&definition.name) {
                    Some(values) if !values.is_empty() => values.iter().cloned().collect(),
                    _ => definition.values.iter().cloned().collect(),
                };
                (definition.name.clone(), values)
            })
            .collect();
        DefaultedCapabilities(filled)
    }
}

/// Capability set after defaulting; compares as sets per capability
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultedCapabilities(BTreeMap<String, BTreeSet<String>>);

impl DefaultedCapabilities {
    /// Requirement on a single capability, e.g. the architecture of a worker
    pub fn requirement(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = BTreeSet::new();
        values.insert(value.into());
        let mut map = BTreeMap::new();
        map.insert(name.into(), values);
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.0.get(name)
    }

    /// Whether every value `required` asks for is offered by this set
    pub fn satisfies(&self, required: &DefaultedCapabilities) -> bool {
        required.0.iter().all(|(name, wanted)| {
            self.0
                .get(name)
                .is_some_and(|offered| wanted.is_subset(offered))
        })
    }
}

impl fmt::Display for DefaultedCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, values)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            write!(f, "{}: [{}]", name, values.join(", "))?;
        }
        write!(f, "}}")
    }
}

/// Default-fill a list of capability sets
///
/// An empty list stands for a single set that accepts every default.
pub fn defaulted_flavors<'a, I>(
    sets: I,
    definitions: &[CapabilityDefinition],
) -> Vec<DefaultedCapabilities>
where
    I: IntoIterator<Item = &'a Capabilities>,
{
    let mut defaulted: Vec<DefaultedCapabilities> = sets
        .into_iter()
        .map(|set| set.with_defaults(definitions))
        .collect();
    if defaulted.is_empty() {
        defaulted.push(Capabilities::new().with_defaults(definitions));
    }
    defaulted
}
