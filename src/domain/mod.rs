// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Configuration Domain Models
//!
//! Decoded configuration objects and the value objects the validators reason
//! about. Everything here is a plain value: constructed per validation call,
//! never mutated by a validator.
//!
//! # Value Objects
//!
//! - [`Cidr`] - address range with its declaring field path
//! - [`Capabilities`] / [`DefaultedCapabilities`] - capability sets
//!
//! # Configuration
//!
//! - [`InfrastructureConfig`] - VPC, zones and dual-stack settings
//! - [`CloudProfileConfig`] - machine image catalog
//! - [`BackupBucketConfig`] - bucket immutability
//! - [`WorkerConfig`] - volumes and instance metadata of a worker pool

pub mod backup;
pub mod capabilities;
pub mod credentials;
pub mod infrastructure;
pub mod machine_image;
pub mod network;
pub mod resources;
pub mod worker;

pub use backup::{BackupBucketConfig, ImmutableConfig, RETENTION_TYPE_BUCKET};
pub use capabilities::{
    defaulted_flavors, Capabilities, CapabilityDefinition, DefaultedCapabilities, ARCHITECTURE,
};
pub use credentials::{CredentialsReference, SecretData, ACCESS_KEY_ID, ACCESS_KEY_SECRET};
pub use infrastructure::{
    DualStack, IgnoreTags, InfrastructureConfig, NatGateway, Networking, Networks, Vpc, Zone,
};
pub use machine_image::{
    CapabilityFlavor, CloudProfileConfig, ImageFlavor, ImageMapping, MachineImage,
    MachineImageVersion, MachineImageVersionMapping, MachineImages, RegionImage,
    DEFAULT_ARCHITECTURE,
};
pub use network::{is_canonical, validate_pairwise_non_overlapping, Cidr, NetworkError};
pub use resources::{BackupBucket, CloudProfile, Provider, Shoot};
pub use worker::{
    DataVolume, DataVolumeConfig, Machine, ShootMachineImage, Volume,
    VolumeConfig, Worker, WorkerConfig,
};
