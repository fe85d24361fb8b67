// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Images and the Provider Image Catalog
//!
//! Two views of the same images:
//!
//! - [`MachineImage`]: what a cloud profile offers (name, versions and the
//!   capability flavors each version must be available in)
//! - [`CloudProfileConfig`]: the provider catalog mapping every image version
//!   to concrete image ids per region
//!
//! A catalog version maps to images either through a flat region list or
//! through capability flavors, never both. [`ImageMapping`] encodes that as a
//! sum type; decoding input that carries both lists fails.

use serde::{Deserialize, Serialize};

use super::capabilities::Capabilities;

/// Architecture assumed when a region mapping or version names none
pub const DEFAULT_ARCHITECTURE: &str = "amd64";

/// Machine image offered by a cloud profile
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineImage {
    pub name: String,

    #[serde(default)]
    pub versions: Vec<MachineImageVersion>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineImageVersion {
    pub version: String,

    /// Architectures this version is built for; used when the profile
    /// defines no capabilities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub architectures: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_flavors: Vec<CapabilityFlavor>,
}

impl MachineImageVersion {
    /// Declared architectures, falling back to the default one
    pub fn architectures_or_default(&self) -> Vec<&str> {
        if self.architectures.is_empty() {
            vec![DEFAULT_ARCHITECTURE]
        } else {
            self.architectures.iter().map(String::as_str).collect()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CapabilityFlavor {
    #[serde(default)]
    pub capabilities: Capabilities,
}

/// Provider configuration of a cloud profile: the image catalog
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProfileConfig {
    #[serde(default)]
    pub machine_images: Vec<MachineImages>,
}

impl CloudProfileConfig {
    pub fn find_image(&self, name: &str) -> Option<&MachineImages> {
        self.machine_images.iter().find(|image| image.name == name)
    }

    pub fn find_version(&self, name: &str, version: &str) -> Option<&MachineImageVersionMapping> {
        self.find_image(name)?
            .versions
            .iter()
            .find(|v| v.version == version)
    }
}

/// Catalog entry for one logical image
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineImages {
    pub name: String,

    #[serde(default)]
    pub versions: Vec<MachineImageVersionMapping>,
}

/// Catalog entry for one image version
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(try_from = "RawVersionMapping", into = "RawVersionMapping")]
pub struct MachineImageVersionMapping {
    pub version: String,

    /// `None` when the input carried neither regions nor capability flavors
    pub mapping: Option<ImageMapping>,
}

/// How a catalog version resolves to provider image ids
#[derive(Clone, Debug)]
pub enum ImageMapping {
    /// Flat region list, used when the profile defines no capabilities
    Regions(Vec<RegionImage>),
    /// Region lists keyed by capability set
    CapabilityFlavors(Vec<ImageFlavor>),
}

/// Image id of a version in one region
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegionImage {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
}

impl RegionImage {
    pub fn architecture_or_default(&self) -> &str {
        self.architecture.as_deref().unwrap_or(DEFAULT_ARCHITECTURE)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ImageFlavor {
    #[serde(default)]
    pub capabilities: Capabilities,

    #[serde(default)]
    pub regions: Vec<RegionImage>,
}

/// Wire shape of [`MachineImageVersionMapping`]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawVersionMapping {
    #[serde(default)]
    version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    regions: Option<Vec<RegionImage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    capability_flavors: Option<Vec<ImageFlavor>>,
}

impl TryFrom<RawVersionMapping> for MachineImageVersionMapping {
    type Error = String;

    fn try_from(raw: RawVersionMapping) -> Result<Self, Self::Error> {
        let mapping = match (raw.regions, raw.capability_flavors) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "machine image version {:?} must not set both regions and capabilityFlavors",
                    raw.version
                ))
            }
            (Some(regions), None) => Some(ImageMapping::Regions(regions)),
            (None, Some(flavors)) => Some(ImageMapping::CapabilityFlavors(flavors)),
            (None, None) => None,
        };
        Ok(Self {
            version: raw.version,
            mapping,
        })
    }
}

impl From<MachineImageVersionMapping> for RawVersionMapping {
    fn from(mapping: MachineImageVersionMapping) -> Self {
        let (regions, capability_flavors) = match mapping.mapping {
            Some(ImageMapping::Regions(regions)) => (Some(regions), None),
            Some(ImageMapping::CapabilityFlavors(flavors)) => (None, Some(flavors)),
            None => (None, None),
        };
        Self {
            version: mapping.version,
            regions,
            capability_flavors,
        }
    }
}
