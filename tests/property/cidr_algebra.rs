// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the CIDR Algebra
//!
//! Overlap must be symmetric, subset checks must agree with containment,
//! and truncated networks must always be canonical.

use cim_provider_validation::domain::is_canonical;
use cim_provider_validation::{Cidr, FieldPath};
use ipnet::Ipv4Net;
use proptest::prelude::*;
use std::net::Ipv4Addr;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Arbitrary canonical IPv4 network
fn ipv4_net() -> impl Strategy<Value = Ipv4Net> {
    (any::<u32>(), 0u8..=32).prop_map(|(addr, prefix)| {
        Ipv4Net::new(Ipv4Addr::from(addr), prefix)
            .expect("prefix is at most 32")
            .trunc()
    })
}

/// A network and one of its supernets
fn nested_pair() -> impl Strategy<Value = (Ipv4Net, Ipv4Net)> {
    ipv4_net().prop_flat_map(|inner| {
        (Just(inner), 0u8..=inner.prefix_len()).prop_map(|(inner, prefix)| {
            let outer = Ipv4Net::new(inner.network(), prefix)
                .expect("prefix is at most 32")
                .trunc();
            (inner, outer)
        })
    })
}

/// The other half of the network's parent
fn sibling(net: &Ipv4Net) -> Ipv4Net {
    let bit = 1u32 << (32 - u32::from(net.prefix_len()));
    let addr = u32::from(net.network()) ^ bit;
    Ipv4Net::new(Ipv4Addr::from(addr), net.prefix_len()).expect("prefix is at most 32")
}

fn cidr(net: &Ipv4Net, field: &str) -> Cidr {
    Cidr::new(net.to_string(), FieldPath::new(field))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: overlap does not depend on argument order
    #[test]
    fn prop_overlap_is_symmetric(a in ipv4_net(), b in ipv4_net()) {
        let a = cidr(&a, "a");
        let b = cidr(&b, "b");
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// Property: a network is accepted inside any of its supernets
    #[test]
    fn prop_subset_of_supernet_is_accepted((inner, outer) in nested_pair()) {
        let inner = cidr(&inner, "inner");
        let outer = cidr(&outer, "outer");
        prop_assert!(inner.validate_subset_of([Some(&outer)]).is_empty());
        prop_assert!(inner.overlaps(&outer));
    }

    /// Property: a disjoint network yields exactly one subset error
    #[test]
    fn prop_disjoint_network_yields_one_error(net in ipv4_net()) {
        prop_assume!(net.prefix_len() > 0);
        let a = cidr(&net, "a");
        let c = cidr(&sibling(&net), "c");

        prop_assert!(!a.overlaps(&c));
        prop_assert_eq!(a.validate_subset_of([Some(&c)]).len(), 1);
        prop_assert!(a.validate_not_overlapping([Some(&c)]).is_empty());
    }

    /// Property: truncated networks are canonical, and so is their text
    #[test]
    fn prop_truncated_networks_are_canonical(net in ipv4_net()) {
        prop_assert!(is_canonical(&net.to_string()));
        prop_assert!(cidr(&net, "net").validate_canonical().is_empty());
    }

    /// Property: setting a host bit below the prefix breaks canonical form
    #[test]
    fn prop_host_bits_are_not_canonical(net in ipv4_net()) {
        prop_assume!(net.prefix_len() < 32);
        let with_host_bit = format!(
            "{}/{}",
            Ipv4Addr::from(u32::from(net.network()) | 1),
            net.prefix_len()
        );
        prop_assert!(!is_canonical(&with_host_bit));
        prop_assert_eq!(
            Cidr::new(with_host_bit, FieldPath::new("net")).validate_canonical().len(),
            1
        );
    }
}
