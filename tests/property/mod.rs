// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod cidr_algebra;
mod retention;
mod zone_updates;
