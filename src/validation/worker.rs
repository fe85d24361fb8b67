// Copyright (c) 2025 - Cowboy AI, Inc.
//! Worker Pool Validation

use crate::domain::{
    CapabilityDefinition, CloudProfileConfig, InfrastructureConfig, VolumeConfig, Worker,
    WorkerConfig, DEFAULT_ARCHITECTURE,
};
use crate::errors::{ErrorList, FieldError};
use crate::path::FieldPath;
use crate::validation::machine_images::find_image_for_region;

/// Validate the decoded provider configuration of one worker pool
pub fn validate_worker_config(config: &WorkerConfig, worker: &Worker, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    if let Some(settings) = &config.volume {
        if worker.volume.is_none() {
            errors.push(FieldError::forbidden(
                &path.child("volume"),
                "must not be set when the worker declares no root volume",
            ));
        }
        errors.extend(validate_volume_settings(settings, &path.child("volume")));
    }

    for (j, data_volume) in config.data_volumes.iter().enumerate() {
        let data_path = path.child("dataVolumes").index(j);

        if !worker.data_volumes.iter().any(|v| v.name == data_volume.name) {
            errors.push(FieldError::invalid(
                &data_path.child("name"),
                &data_volume.name,
                format!("could not find data volume with name {:?}", data_volume.name),
            ));
        }

        let settings = VolumeConfig {
            iops: data_volume.iops,
            throughput: data_volume.throughput,
        };
        errors.extend(validate_volume_settings(&settings, &data_path));
    }

    errors
}

fn validate_volume_settings(settings: &VolumeConfig, path: &FieldPath) -> ErrorList {
    [("iops", settings.iops), ("throughput", settings.throughput)]
        .into_iter()
        .filter_map(|(field, value)| match value {
            Some(value) if value <= 0 => Some(FieldError::invalid(
                &path.child(field),
                value,
                "must be a positive value",
            )),
            _ => None,
        })
        .collect()
}

/// Cross-check worker pools against the infrastructure and image catalog
pub fn validate_workers(
    workers: &[Worker],
    infrastructure: &InfrastructureConfig,
    catalog: &CloudProfileConfig,
    definitions: &[CapabilityDefinition],
    region: &str,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();

    for (i, worker) in workers.iter().enumerate() {
        let worker_path = path.index(i);

        for (k, zone) in worker.zones.iter().enumerate() {
            if !infrastructure.networks.zones.iter().any(|z| &z.name == zone) {
                errors.push(FieldError::invalid(
                    &worker_path.child("zones").index(k),
                    zone,
                    "must be declared in the infrastructure config",
                ));
            }
        }

        if let Some(image) = &worker.machine.image {
            let architecture = worker
                .machine
                .architecture
                .as_deref()
                .unwrap_or(DEFAULT_ARCHITECTURE);
            let found = find_image_for_region(
                catalog,
                definitions,
                &image.name,
                &image.version,
                region,
                architecture,
            );
            if found.is_none() {
                errors.push(FieldError::invalid(
                    &worker_path.child("machine").child("image"),
                    format!("{}@{}", image.name, image.version),
                    format!(
                        "could not find an image for region {:?} and architecture {:?}",
                        region, architecture
                    ),
                ));
            }
        }
    }

    errors
}
