// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validated Resources
//!
//! The objects the admission layer receives. Provider-specific sections stay
//! undecoded (`serde_json::Value`) until a validator decodes them, so a
//! malformed provider section is reported as a field error instead of
//! failing the whole object.

use serde::{Deserialize, Serialize};

use super::capabilities::CapabilityDefinition;
use super::credentials::CredentialsReference;
use super::infrastructure::Networking;
use super::machine_image::MachineImage;
use super::worker::Worker;

/// A cluster as requested by its owner
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shoot {
    pub name: String,

    pub region: String,

    #[serde(default)]
    pub networking: Networking,

    pub provider: Provider,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Undecoded `InfrastructureConfig`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_config: Option<serde_json::Value>,

    #[serde(default)]
    pub workers: Vec<Worker>,
}

/// Catalog of what clusters of one provider may use
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProfile {
    pub name: String,

    #[serde(default)]
    pub machine_images: Vec<MachineImage>,

    /// Capability schema; empty when images are mapped by architecture only
    #[serde(default)]
    pub capabilities: Vec<CapabilityDefinition>,

    /// Undecoded `CloudProfileConfig`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,
}

/// Object storage bucket for cluster backups
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupBucket {
    pub name: String,

    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_ref: Option<CredentialsReference>,

    /// Undecoded `BackupBucketConfig`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<serde_json::Value>,
}
