// Copyright (c) 2025 - Cowboy AI, Inc.
//! Machine Image Catalog Validation
//!
//! Two independent passes over a cloud profile:
//!
//! 1. [`validate_cloud_profile_config`] checks the catalog on its own: names,
//!    versions and the regions-or-capability-flavors rule.
//! 2. [`validate_image_mappings`] checks that every image version the
//!    profile offers resolves through the catalog, matching capability sets
//!    after defaulting when the profile defines capabilities.

use crate::domain::{
    defaulted_flavors, CapabilityDefinition, CloudProfileConfig, DefaultedCapabilities, ImageFlavor,
    ImageMapping, MachineImage, MachineImageVersionMapping, MachineImages, RegionImage,
    ARCHITECTURE,
};
use crate::errors::{ErrorList, FieldError};
use crate::path::FieldPath;

/// Structural rules of the image catalog
pub fn validate_cloud_profile_config(
    config: &CloudProfileConfig,
    definitions: &[CapabilityDefinition],
    supported_architectures: &[String],
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();

    for (i, image) in config.machine_images.iter().enumerate() {
        let image_path = path.index(i);

        if image.name.is_empty() {
            errors.push(FieldError::required(
                &image_path.child("name"),
                "must provide a name",
            ));
        }

        if image.versions.is_empty() {
            errors.push(FieldError::required(
                &image_path.child("versions"),
                format!(
                    "must provide at least one version for the machine image {:?}",
                    image.name
                ),
            ));
        }

        for (j, version) in image.versions.iter().enumerate() {
            let version_path = image_path.child("versions").index(j);
            if version.version.is_empty() {
                errors.push(FieldError::required(
                    &version_path.child("version"),
                    "must provide a version",
                ));
            }
            errors.extend(validate_version_mapping(
                image,
                version,
                definitions,
                supported_architectures,
                &version_path,
            ));
        }
    }

    errors
}

fn validate_version_mapping(
    image: &MachineImages,
    version: &MachineImageVersionMapping,
    definitions: &[CapabilityDefinition],
    supported_architectures: &[String],
    path: &FieldPath,
) -> ErrorList {
    let regions_path = path.child("regions");
    let flavors_path = path.child("capabilityFlavors");

    if definitions.is_empty() {
        return match &version.mapping {
            Some(ImageMapping::CapabilityFlavors(_)) => FieldError::forbidden(
                &flavors_path,
                "must not be set as the cloud profile defines no capabilities, use regions instead",
            )
            .into(),
            Some(ImageMapping::Regions(regions)) if !regions.is_empty() => {
                validate_regions(regions, supported_architectures, false, &regions_path)
            }
            _ => FieldError::required(
                &regions_path,
                format!(
                    "must provide at least one region for machine image {:?} and version {:?}",
                    image.name, version.version
                ),
            )
            .into(),
        };
    }

    match &version.mapping {
        Some(ImageMapping::Regions(_)) => FieldError::forbidden(
            &regions_path,
            "must not be set as the cloud profile defines capabilities, use capabilityFlavors.regions instead",
        )
        .into(),
        Some(ImageMapping::CapabilityFlavors(flavors)) if !flavors.is_empty() => flavors
            .iter()
            .enumerate()
            .flat_map(|(k, flavor)| {
                validate_flavor(
                    flavor,
                    definitions,
                    supported_architectures,
                    &flavors_path.index(k),
                )
            })
            .collect(),
        _ => FieldError::required(
            &flavors_path,
            format!(
                "must provide at least one capability flavor for machine image {:?} and version {:?}",
                image.name, version.version
            ),
        )
        .into(),
    }
}

fn validate_flavor(
    flavor: &ImageFlavor,
    definitions: &[CapabilityDefinition],
    supported_architectures: &[String],
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();
    let capabilities_path = path.child("capabilities");

    for (name, values) in flavor.capabilities.iter() {
        let name_path = capabilities_path.key(name);
        let Some(definition) = definitions.iter().find(|d| &d.name == name) else {
            let defined: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
            errors.push(FieldError::not_supported(&name_path, name, &defined));
            continue;
        };
        for (v, value) in values.iter().enumerate() {
            if !definition.values.contains(value) {
                errors.push(FieldError::not_supported(
                    &name_path.index(v),
                    value,
                    &definition.values,
                ));
            }
        }
    }

    let regions_path = path.child("regions");
    if flavor.regions.is_empty() {
        errors.push(FieldError::required(
            &regions_path,
            "must provide at least one region",
        ));
    } else {
        errors.extend(validate_regions(
            &flavor.regions,
            supported_architectures,
            true,
            &regions_path,
        ));
    }

    errors
}

fn validate_regions(
    regions: &[RegionImage],
    supported_architectures: &[String],
    capabilities_defined: bool,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();

    for (k, region) in regions.iter().enumerate() {
        let region_path = path.index(k);

        if region.name.is_empty() {
            errors.push(FieldError::required(
                &region_path.child("name"),
                "must provide a name",
            ));
        }
        if region.id.is_empty() {
            errors.push(FieldError::required(
                &region_path.child("id"),
                "must provide an image id",
            ));
        }

        match &region.architecture {
            Some(_) if capabilities_defined => errors.push(FieldError::forbidden(
                &region_path.child("architecture"),
                "must be expressed through the flavor capabilities",
            )),
            Some(arch) if !supported_architectures.contains(arch) => {
                errors.push(FieldError::not_supported(
                    &region_path.child("architecture"),
                    arch,
                    supported_architectures,
                ))
            }
            _ => {}
        }
    }

    errors
}

/// Every offered image version must resolve through the catalog
pub fn validate_image_mappings(
    declared: &[MachineImage],
    config: &CloudProfileConfig,
    definitions: &[CapabilityDefinition],
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();

    for image in declared.iter().filter(|image| !image.versions.is_empty()) {
        let Some(catalog_image) = config.find_image(&image.name) else {
            errors.push(FieldError::required(
                path,
                format!(
                    "must provide an image mapping for image {:?} in providerConfig",
                    image.name
                ),
            ));
            continue;
        };

        for version in &image.versions {
            let Some(mapping) = catalog_image
                .versions
                .iter()
                .find(|v| v.version == version.version)
            else {
                errors.push(FieldError::required(
                    path,
                    format!(
                        "machine image version {}@{} is not defined in the providerConfig",
                        image.name, version.version
                    ),
                ));
                continue;
            };

            if definitions.is_empty() {
                let regions: &[RegionImage] = match &mapping.mapping {
                    Some(ImageMapping::Regions(regions)) => regions,
                    _ => &[],
                };
                for arch in version.architectures_or_default() {
                    if !regions.iter().any(|r| r.architecture_or_default() == arch) {
                        errors.push(FieldError::required(
                            path,
                            format!(
                                "missing providerConfig mapping for machine image version {}@{} and architecture: {}",
                                image.name, version.version, arch
                            ),
                        ));
                    }
                }
                continue;
            }

            let available: Vec<DefaultedCapabilities> = match &mapping.mapping {
                Some(ImageMapping::CapabilityFlavors(flavors)) => flavors
                    .iter()
                    .map(|f| f.capabilities.with_defaults(definitions))
                    .collect(),
                _ => Vec::new(),
            };
            let wanted = defaulted_flavors(
                version.capability_flavors.iter().map(|f| &f.capabilities),
                definitions,
            );
            for set in wanted {
                if !available.contains(&set) {
                    errors.push(FieldError::required(
                        path,
                        format!(
                            "missing providerConfig mapping for machine image version {}@{} and capabilitySet {}",
                            image.name, version.version, set
                        ),
                    ));
                }
            }
        }
    }

    errors
}

/// Provider image id of `name@version` in `region` for the given architecture
pub fn find_image_for_region<'a>(
    config: &'a CloudProfileConfig,
    definitions: &[CapabilityDefinition],
    name: &str,
    version: &str,
    region: &str,
    architecture: &str,
) -> Option<&'a str> {
    let mapping = config.find_version(name, version)?;

    match mapping.mapping.as_ref()? {
        ImageMapping::Regions(regions) => regions
            .iter()
            .find(|r| r.name == region && r.architecture_or_default() == architecture)
            .map(|r| r.id.as_str()),
        ImageMapping::CapabilityFlavors(flavors) => {
            let required = DefaultedCapabilities::requirement(ARCHITECTURE, architecture);
            flavors
                .iter()
                .filter(|f| f.capabilities.with_defaults(definitions).satisfies(&required))
                .flat_map(|f| f.regions.iter())
                .find(|r| r.name == region)
                .map(|r| r.id.as_str())
        }
    }
}
