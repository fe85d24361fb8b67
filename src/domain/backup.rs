// Copyright (c) 2025 - Cowboy AI, Inc.
//! Backup Bucket Provider Configuration

use serde::{Deserialize, Serialize};

/// The only retention type the provider supports
pub const RETENTION_TYPE_BUCKET: &str = "bucket";

/// Provider configuration of a backup bucket
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackupBucketConfig {
    /// Object lock settings; `None` leaves the bucket mutable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutability: Option<ImmutableConfig>,
}

/// Write-once-read-many retention policy of a bucket
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImmutableConfig {
    pub retention_type: String,

    /// Retention period in whole days
    pub retention_period: i64,

    /// Once locked the policy can only be tightened
    #[serde(default)]
    pub locked: bool,
}

impl ImmutableConfig {
    pub fn bucket(retention_period: i64, locked: bool) -> Self {
        Self {
            retention_type: RETENTION_TYPE_BUCKET.to_string(),
            retention_period,
            locked,
        }
    }
}
