// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-provider-validation
//!
//! Deterministic resources used by the admission tests. Every fixture is
//! built from a `json!` literal so tests read like the objects a user would
//! submit.

use serde_json::{json, Value};

use cim_provider_validation::domain::{
    BackupBucket, CloudProfile, SecretData, Shoot, ACCESS_KEY_ID, ACCESS_KEY_SECRET,
};

pub const REGION: &str = "eu-west-1";
pub const ZONE_A: &str = "eu-west-1a";
pub const ZONE_B: &str = "eu-west-1b";

/// Two-zone infrastructure inside `10.0.0.0/8`
pub fn infrastructure_config() -> Value {
    json!({
        "networks": {
            "vpc": { "cidr": "10.0.0.0/8" },
            "zones": [
                { "name": ZONE_A, "workers": "10.250.0.0/19", "internal": "10.250.112.0/22", "public": "10.250.96.0/22" },
                { "name": ZONE_B, "workers": "10.250.32.0/19", "internal": "10.250.116.0/22", "public": "10.250.100.0/22" }
            ]
        }
    })
}

/// Shoot in [`REGION`] with one worker pool per zone
pub fn shoot_with(infrastructure_config: Value) -> Shoot {
    serde_json::from_value(json!({
        "name": "dev",
        "region": REGION,
        "networking": {
            "nodes": "10.250.0.0/16",
            "pods": "100.96.0.0/11",
            "services": "100.64.0.0/13"
        },
        "provider": {
            "infrastructureConfig": infrastructure_config,
            "workers": [{
                "name": "pool-a",
                "machine": { "type": "standard-4", "image": { "name": "ubuntu", "version": "1.2.3" } },
                "zones": [ZONE_A, ZONE_B],
                "volume": { "type": "standard", "size": "50Gi" },
                "providerConfig": { "volume": { "throughput": 200 } }
            }]
        }
    }))
    .expect("Invalid shoot fixture")
}

pub fn shoot() -> Shoot {
    shoot_with(infrastructure_config())
}

/// Profile offering `ubuntu@1.2.3` for amd64 in [`REGION`]
pub fn cloud_profile() -> CloudProfile {
    serde_json::from_value(json!({
        "name": "aws",
        "machineImages": [{ "name": "ubuntu", "versions": [{ "version": "1.2.3" }] }],
        "providerConfig": {
            "machineImages": [{
                "name": "ubuntu",
                "versions": [{
                    "version": "1.2.3",
                    "regions": [{ "name": REGION, "id": "img-0123456789abcdef0" }]
                }]
            }]
        }
    }))
    .expect("Invalid cloud profile fixture")
}

/// Bucket with the given immutability settings, or none
pub fn backup_bucket(immutability: Option<Value>) -> BackupBucket {
    let provider_config = immutability.map(|i| json!({ "immutability": i }));
    serde_json::from_value(json!({
        "name": "backups",
        "region": REGION,
        "credentialsRef": { "apiVersion": "v1", "kind": "Secret", "name": "backup-credentials", "namespace": "garden" },
        "providerConfig": provider_config
    }))
    .expect("Invalid backup bucket fixture")
}

pub fn retention(period: i64, locked: bool) -> Value {
    json!({ "retentionType": "bucket", "retentionPeriod": period, "locked": locked })
}

pub fn secret(access_key_id: &str, access_key_secret: &str) -> SecretData {
    let mut data = SecretData::new();
    data.insert(ACCESS_KEY_ID.to_string(), access_key_id.as_bytes().to_vec());
    data.insert(
        ACCESS_KEY_SECRET.to_string(),
        access_key_secret.as_bytes().to_vec(),
    );
    data
}
