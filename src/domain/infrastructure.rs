// Copyright (c) 2025 - Cowboy AI, Inc.
//! Infrastructure Provider Configuration
//!
//! Decoded form of the network topology a cluster asks the provider to
//! create or adopt: a VPC, one subnet layout per availability zone and the
//! optional dual-stack switch.

use serde::{Deserialize, Serialize};

/// Cluster-wide address ranges owned by the cluster networking section
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
}

/// Provider-specific infrastructure configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureConfig {
    pub networks: Networks,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual_stack: Option<DualStack>,

    /// Tags on provider resources that reconciliation must leave alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_tags: Option<IgnoreTags>,
}

impl InfrastructureConfig {
    /// Whether dual-stack networking is switched on
    pub fn dual_stack_enabled(&self) -> bool {
        self.dual_stack.as_ref().is_some_and(|d| d.enabled)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Networks {
    #[serde(default)]
    pub vpc: Vpc,

    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// VPC descriptor
///
/// Exactly one of `id` (adopt an existing VPC) or `cidr` (create one) must be
/// set. Both fields stay optional here so a configuration carrying both can
/// be decoded and rejected with a field error.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vpc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,

    /// Service names for VPC gateway endpoints, e.g. "s3"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gateway_endpoints: Vec<String>,
}

/// Subnet layout of one availability zone
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub name: String,

    /// Subnet for worker nodes, empty when not declared
    #[serde(default)]
    pub workers: String,

    /// Subnet for internal load balancers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<String>,

    /// Subnet for public load balancers and the NAT gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway: Option<NatGateway>,
}

/// NAT gateway bound to a pre-allocated elastic IP
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct NatGateway {
    #[serde(rename = "elasticIPAllocationID", default)]
    pub elastic_ip_allocation_id: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DualStack {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreTags {
    #[serde(default)]
    pub keys: Vec<String>,

    #[serde(default)]
    pub key_prefixes: Vec<String>,
}
