//! Runtime adapters and the diagnostics API surface.

pub mod api;
pub mod tokio_spawner;

pub use api::{health, list_lanes, Health, LaneSnapshot};
pub use tokio_spawner::TokioSpawner;
