//! Core domain logic for arborist
//!
//! This module contains the branch classification logic and its data model.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (RepositoryIdentity, RepoSnapshot, FleetVerdict, FleetPolicy)
//! - `services/` - Snapshot, classify, filter, prune
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
