//! Builders to construct lane registries from configuration.

pub mod registry_builder;

pub use registry_builder::{build_registry, build_registry_from_env, build_registry_from_lookup};
