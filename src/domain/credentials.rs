// Copyright (c) 2025 - Cowboy AI, Inc.
//! Credential References and Secret Material

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Data key holding the access key id
pub const ACCESS_KEY_ID: &str = "accessKeyID";

/// Data key holding the access key secret
pub const ACCESS_KEY_SECRET: &str = "accessKeySecret";

/// Raw key/value payload of a secret
pub type SecretData = BTreeMap<String, Vec<u8>>;

/// Reference to the object holding provider credentials
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,

    #[serde(default)]
    pub namespace: String,
}

impl CredentialsReference {
    /// Reference to a core `v1` secret
    pub fn secret(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "Secret".to_string(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for CredentialsReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}, {}/{}",
            self.api_version, self.kind, self.namespace, self.name
        )
    }
}
