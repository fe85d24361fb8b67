// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validator configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable listing regions that allow dual-stack networking
pub const DUAL_STACK_REGIONS_ENV: &str = "CIM_VALIDATOR_DUAL_STACK_REGIONS";

/// Environment variable listing the machine architectures the provider supports
pub const ARCHITECTURES_ENV: &str = "CIM_VALIDATOR_ARCHITECTURES";

/// Settings shared by every validation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Regions in which dual-stack networking may be enabled
    pub dual_stack_regions: Vec<String>,

    /// Architectures accepted in image region mappings
    pub supported_architectures: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            dual_stack_regions: Vec::new(),
            supported_architectures: vec!["amd64".to_string(), "arm64".to_string()],
        }
    }
}

impl ValidatorConfig {
    pub fn with_dual_stack_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dual_stack_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_supported_architectures<I, S>(mut self, architectures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_architectures = architectures.into_iter().map(Into::into).collect();
        self
    }

    /// Load from environment variables, falling back to the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(regions) = read_list(DUAL_STACK_REGIONS_ENV)? {
            config.dual_stack_regions = regions;
        }
        if let Some(architectures) = read_list(ARCHITECTURES_ENV)? {
            if architectures.is_empty() {
                anyhow::bail!("{} must name at least one architecture", ARCHITECTURES_ENV);
            }
            config.supported_architectures = architectures;
        }

        Ok(config)
    }

    /// Load from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse validator configuration")
    }

    pub fn is_dual_stack_region(&self, region: &str) -> bool {
        self.dual_stack_regions.iter().any(|r| r == region)
    }
}

fn read_list(var: &str) -> Result<Option<Vec<String>>> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(parse_list(&value))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", var)),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
