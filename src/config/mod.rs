//! Configuration models for lanes and the lane registry.

pub mod lane;

pub use lane::{LaneConfig, RegistryConfig, DEFAULT_SETTLE_DELAY_MS};
