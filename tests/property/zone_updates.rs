// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Zone List Updates
//!
//! Zones may be appended; existing zones keep their name and subnets and
//! are never removed.

use cim_provider_validation::domain::{InfrastructureConfig, Networking, Networks, Vpc, Zone};
use cim_provider_validation::validation::{
    validate_infrastructure_config, validate_infrastructure_config_update,
};
use proptest::prelude::*;

/// Zone `i` owns `10.<i>.0.0/16`, so generated zones never overlap
fn zone(i: usize) -> Zone {
    Zone {
        name: format!("zone-{}", i),
        workers: format!("10.{}.0.0/16", i),
        ..Default::default()
    }
}

fn config(zones: usize) -> InfrastructureConfig {
    InfrastructureConfig {
        networks: Networks {
            vpc: Vpc {
                cidr: Some("10.0.0.0/8".to_string()),
                ..Default::default()
            },
            zones: (0..zones).map(zone).collect(),
        },
        ..Default::default()
    }
}

proptest! {
    /// Property: appending zones is always accepted
    #[test]
    fn prop_append_is_accepted(existing in 1usize..8, added in 0usize..8) {
        let old = config(existing);
        let new = config(existing + added);
        prop_assert!(validate_infrastructure_config_update(&old, &new).is_empty());
    }

    /// Property: removing any number of zones is rejected
    #[test]
    fn prop_removal_is_rejected(existing in 1usize..8, removed in 1usize..8) {
        let removed = removed.min(existing);
        let old = config(existing);
        let new = config(existing - removed);
        prop_assert!(!validate_infrastructure_config_update(&old, &new).is_empty());
    }

    /// Property: changing an existing zone's name or workers is rejected
    #[test]
    fn prop_mutation_is_rejected(existing in 1usize..8, index in 0usize..8, rename in any::<bool>()) {
        let index = index % existing;
        let old = config(existing);
        let mut new = old.clone();
        if rename {
            new.networks.zones[index].name = "renamed".to_string();
        } else {
            new.networks.zones[index].workers = "10.200.0.0/16".to_string();
        }
        prop_assert_eq!(validate_infrastructure_config_update(&old, &new).len(), 1);
    }

    /// Property: validating the same input twice yields the same errors
    #[test]
    fn prop_validation_is_idempotent(zones in 0usize..8, nodes in prop::option::of(0u8..=255)) {
        let config = config(zones);
        let networking = Networking {
            nodes: nodes.map(|n| format!("10.{}.0.0/16", n)),
            ..Default::default()
        };
        let first = validate_infrastructure_config(&config, &networking, "eu-west-1", &[]);
        let second = validate_infrastructure_config(&config, &networking, "eu-west-1", &[]);
        prop_assert_eq!(first, second);
    }
}
