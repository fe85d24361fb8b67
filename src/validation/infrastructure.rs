// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Topology Validation
//!
//! Checks the VPC and zone layout of an [`InfrastructureConfig`] against the
//! cluster's node, pod and service ranges, and guards the fields that cannot
//! change once the infrastructure exists.
//!
//! # Rules
//!
//! - At least one zone; zone names unique
//! - Zone ranges canonical, inside the VPC, pairwise disjoint
//! - Worker ranges inside the node range
//! - Pod and service ranges disjoint from the VPC and every zone range
//! - Exactly one of VPC id or VPC CIDR
//! - Dual-stack only for managed VPCs in allow-listed regions

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::domain::network::{validate_pairwise_non_overlapping, Cidr};
use crate::domain::{IgnoreTags, InfrastructureConfig, NatGateway, Networking, Vpc, Zone};
use crate::errors::{ErrorList, FieldError};
use crate::path::FieldPath;

/// Maximum length of a tag key
pub const MAX_TAG_KEY_LENGTH: usize = 128;

/// Maximum number of user tags on a provider resource
pub const MAX_IGNORED_TAGS: usize = 50;

/// Tag keys the provider relies on for its own bookkeeping
const RESERVED_TAG_KEYS: &[&str] = &["Name"];

const RESERVED_TAG_PREFIXES: &[&str] = &["kubernetes.io/cluster/", "kubernetes.io/role/"];

static GATEWAY_ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+(\.\w+)*$").expect("gateway endpoint pattern must compile")
});

/// Address ranges declared by one zone
struct ZoneCidrs {
    workers: Option<Cidr>,
    internal: Option<Cidr>,
    public: Option<Cidr>,
}

impl ZoneCidrs {
    fn new(zone: &Zone, path: &FieldPath) -> Self {
        let workers = Some(zone.workers.as_str()).filter(|w| !w.is_empty());
        Self {
            workers: Cidr::from_optional(workers, path.child("workers")),
            internal: Cidr::from_optional(zone.internal.as_deref(), path.child("internal")),
            public: Cidr::from_optional(zone.public.as_deref(), path.child("public")),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Cidr> {
        [&self.workers, &self.internal, &self.public]
            .into_iter()
            .flatten()
    }
}

/// Validate a new infrastructure configuration
///
/// Every check runs and accumulates; a check only becomes vacuous when the
/// range it depends on is absent.
pub fn validate_infrastructure_config(
    config: &InfrastructureConfig,
    networking: &Networking,
    region: &str,
    dual_stack_regions: &[String],
) -> ErrorList {
    let mut errors = ErrorList::new();

    let networks_path = FieldPath::new("networks");
    let zones_path = networks_path.child("zones");
    let vpc_path = networks_path.child("vpc");
    let networking_path = FieldPath::new("networking");

    let nodes = Cidr::from_optional(networking.nodes.as_deref(), networking_path.child("nodes"));
    let pods = Cidr::from_optional(networking.pods.as_deref(), networking_path.child("pods"));
    let services = Cidr::from_optional(
        networking.services.as_deref(),
        networking_path.child("services"),
    );

    if config.networks.zones.is_empty() {
        errors.push(FieldError::required(
            &zones_path,
            "must specify at least the networks for one zone",
        ));
    }

    let zone_cidrs: Vec<ZoneCidrs> = config
        .networks
        .zones
        .iter()
        .enumerate()
        .map(|(i, zone)| ZoneCidrs::new(zone, &zones_path.index(i)))
        .collect();

    errors.extend(validate_zones(&config.networks.zones, &zone_cidrs, &zones_path));
    errors.extend(validate_vpc(
        &config.networks.vpc,
        config.dual_stack_enabled(),
        region,
        dual_stack_regions,
        &vpc_path,
    ));

    let workers: Vec<&Cidr> = zone_cidrs.iter().filter_map(|z| z.workers.as_ref()).collect();
    let all_zone_ranges: Vec<&Cidr> = zone_cidrs.iter().flat_map(|z| z.iter()).collect();

    if nodes.is_some() {
        for worker in &workers {
            errors.extend(worker.validate_subset_of([nodes.as_ref()]));
        }
    }

    let vpc_cidr = Cidr::from_optional(config.networks.vpc.cidr.as_deref(), vpc_path.child("cidr"));
    if let Some(vpc) = &vpc_cidr {
        errors.extend(vpc.validate_canonical());
        if let Some(nodes) = &nodes {
            errors.extend(nodes.validate_subset_of([Some(vpc)]));
        }
        for range in &all_zone_ranges {
            errors.extend(range.validate_subset_of([Some(vpc)]));
        }
        for range in [&pods, &services].into_iter().flatten() {
            errors.extend(range.validate_not_overlapping([Some(vpc)]));
        }
    }

    errors.extend(validate_pairwise_non_overlapping(
        all_zone_ranges.iter().copied().map(Some),
        false,
    ));
    for range in [&pods, &services].into_iter().flatten() {
        errors.extend(range.validate_not_overlapping(all_zone_ranges.iter().copied().map(Some)));
    }

    if let Some(tags) = &config.ignore_tags {
        errors.extend(validate_ignore_tags(tags, &FieldPath::new("ignoreTags")));
    }

    errors
}

/// Validate the transition from `old` to `new`
///
/// The VPC never changes, zones may only be appended, and an existing zone
/// keeps its name and subnets. NAT gateways may change freely.
pub fn validate_infrastructure_config_update(
    old: &InfrastructureConfig,
    new: &InfrastructureConfig,
) -> ErrorList {
    let mut errors = ErrorList::new();
    let networks_path = FieldPath::new("networks");
    let zones_path = networks_path.child("zones");

    if old.networks.vpc != new.networks.vpc {
        errors.push(FieldError::invalid_field(
            &networks_path.child("vpc"),
            "field is immutable",
        ));
    }

    if new.networks.zones.len() < old.networks.zones.len() {
        errors.push(FieldError::forbidden(
            &zones_path,
            "removing zones is not allowed",
        ));
    }

    for (i, (old_zone, new_zone)) in old
        .networks
        .zones
        .iter()
        .zip(new.networks.zones.iter())
        .enumerate()
    {
        let zone_path = zones_path.index(i);
        errors.extend(validate_immutable(
            Some(old_zone.name.as_str()),
            Some(new_zone.name.as_str()),
            &zone_path.child("name"),
        ));
        errors.extend(validate_immutable(
            Some(old_zone.workers.as_str()),
            Some(new_zone.workers.as_str()),
            &zone_path.child("workers"),
        ));
        errors.extend(validate_immutable(
            old_zone.internal.as_deref(),
            new_zone.internal.as_deref(),
            &zone_path.child("internal"),
        ));
        errors.extend(validate_immutable(
            old_zone.public.as_deref(),
            new_zone.public.as_deref(),
            &zone_path.child("public"),
        ));
    }

    if old.dual_stack_enabled() && !new.dual_stack_enabled() {
        errors.push(FieldError::forbidden(
            &FieldPath::new("dualStack").child("enabled"),
            "dual-stack cannot be disabled once it is enabled",
        ));
    }

    errors
}

/// A value that was set must not change
fn validate_immutable(old: Option<&str>, new: Option<&str>, path: &FieldPath) -> ErrorList {
    match old {
        Some(old) if !old.is_empty() && Some(old) != new => {
            FieldError::invalid(path, new.unwrap_or_default(), "field is immutable").into()
        }
        _ => ErrorList::new(),
    }
}

fn validate_zones(zones: &[Zone], zone_cidrs: &[ZoneCidrs], path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    let mut names = HashSet::new();
    let mut allocation_ids = HashSet::new();

    for (i, (zone, cidrs)) in zones.iter().zip(zone_cidrs).enumerate() {
        let zone_path = path.index(i);

        if zone.name.is_empty() {
            errors.push(FieldError::required(
                &zone_path.child("name"),
                "must specify the zone name",
            ));
        } else if !names.insert(zone.name.as_str()) {
            errors.push(FieldError::invalid(
                &zone_path.child("name"),
                &zone.name,
                "zone name must be unique",
            ));
        }

        for range in cidrs.iter() {
            errors.extend(range.validate_canonical());
        }

        if let Some(nat) = &zone.nat_gateway {
            errors.extend(validate_nat_gateway(
                nat,
                &zone_path.child("natGateway"),
                &mut allocation_ids,
            ));
        }
    }

    errors
}

fn validate_nat_gateway<'a>(
    nat: &'a NatGateway,
    path: &FieldPath,
    seen: &mut HashSet<&'a str>,
) -> ErrorList {
    let id_path = path.child("elasticIPAllocationID");
    let id = nat.elastic_ip_allocation_id.as_str();

    if id.is_empty() {
        FieldError::required(
            &id_path,
            "must provide an elastic IP allocation id when a NAT gateway is configured",
        )
        .into()
    } else if !seen.insert(id) {
        FieldError::invalid(
            &id_path,
            id,
            "elastic IP allocation id is already used by another zone",
        )
        .into()
    } else {
        ErrorList::new()
    }
}

fn validate_vpc(
    vpc: &Vpc,
    dual_stack: bool,
    region: &str,
    dual_stack_regions: &[String],
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();

    match (&vpc.id, &vpc.cidr) {
        (Some(_), Some(_)) | (None, None) => {
            errors.push(FieldError::invalid_field(
                path,
                "must specify either a vpc id or a cidr",
            ));
        }
        (Some(id), None) if id.is_empty() => {
            errors.push(FieldError::invalid(&path.child("id"), id, "must not be empty"));
        }
        _ => {}
    }

    if dual_stack {
        if vpc.id.is_some() {
            errors.push(FieldError::forbidden(
                &path.child("id"),
                "dual-stack cannot be enabled for an externally managed VPC",
            ));
        }
        if !dual_stack_regions.iter().any(|r| r == region) {
            errors.push(FieldError::invalid(
                &FieldPath::new("dualStack").child("enabled"),
                region,
                "can not enable DualStack in target region",
            ));
        }
    }

    let mut endpoints = HashSet::new();
    for (i, endpoint) in vpc.gateway_endpoints.iter().enumerate() {
        let endpoint_path = path.child("gatewayEndpoints").index(i);
        if !GATEWAY_ENDPOINT.is_match(endpoint) {
            errors.push(FieldError::invalid(
                &endpoint_path,
                endpoint,
                "must be a valid service name, e.g. \"s3\"",
            ));
        } else if !endpoints.insert(endpoint.as_str()) {
            errors.push(FieldError::invalid(
                &endpoint_path,
                endpoint,
                "gateway endpoint must be unique",
            ));
        }
    }

    errors
}

fn validate_ignore_tags(tags: &IgnoreTags, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    let keys_path = path.child("keys");
    if tags.keys.len() > MAX_IGNORED_TAGS {
        errors.push(FieldError::too_many(&keys_path, tags.keys.len(), MAX_IGNORED_TAGS));
    }
    for (i, key) in tags.keys.iter().enumerate() {
        let key_path = keys_path.index(i);
        if let Some(err) = validate_tag_entry(key, &key_path) {
            errors.push(err);
        } else if RESERVED_TAG_KEYS.contains(&key.as_str())
            || RESERVED_TAG_PREFIXES.iter().any(|p| key.starts_with(p))
        {
            errors.push(FieldError::forbidden(
                &key_path,
                format!("must not ignore tag key {:?} reserved by the provider", key),
            ));
        }
    }

    let prefixes_path = path.child("keyPrefixes");
    if tags.key_prefixes.len() > MAX_IGNORED_TAGS {
        errors.push(FieldError::too_many(
            &prefixes_path,
            tags.key_prefixes.len(),
            MAX_IGNORED_TAGS,
        ));
    }
    for (i, prefix) in tags.key_prefixes.iter().enumerate() {
        let prefix_path = prefixes_path.index(i);
        if let Some(err) = validate_tag_entry(prefix, &prefix_path) {
            errors.push(err);
        } else if RESERVED_TAG_KEYS.iter().any(|k| k.starts_with(prefix.as_str()))
            || RESERVED_TAG_PREFIXES
                .iter()
                .any(|p| p.starts_with(prefix.as_str()) || prefix.starts_with(p))
        {
            errors.push(FieldError::forbidden(
                &prefix_path,
                format!("must not ignore tag prefix {:?} reserved by the provider", prefix),
            ));
        }
    }

    errors
}

fn validate_tag_entry(entry: &str, path: &FieldPath) -> Option<FieldError> {
    if entry.is_empty() {
        Some(FieldError::invalid(path, entry, "must not be empty"))
    } else if entry.len() > MAX_TAG_KEY_LENGTH {
        Some(FieldError::too_long(path, entry, MAX_TAG_KEY_LENGTH))
    } else {
        None
    }
}
