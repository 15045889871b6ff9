//! Read-only snapshots of lanes for diagnostics.

use serde::{Deserialize, Serialize};

use crate::core::{Lane, LaneRegistry};

/// Point-in-time view of one lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    /// Lane name.
    pub name: String,
    /// Units waiting to be presented.
    pub pending: usize,
    /// Whether the run-loop is draining the lane.
    pub running: bool,
    /// Whether the lane refuses to start new units.
    pub paused: bool,
    /// Minimum delay in milliseconds.
    pub minimum_delay_ms: u64,
    /// Whether the lane survives becoming empty.
    pub preserve_when_empty: bool,
}

impl LaneSnapshot {
    /// Capture the current state of `lane`.
    pub fn of(lane: &Lane) -> Self {
        Self {
            name: lane.name().to_string(),
            pending: lane.len(),
            running: lane.is_running(),
            paused: lane.is_paused(),
            minimum_delay_ms: u64::try_from(lane.minimum_delay().as_millis()).unwrap_or(u64::MAX),
            preserve_when_empty: lane.preserve_when_empty(),
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Number of live lanes.
    pub lanes: usize,
}

/// Snapshots of every live lane, sorted by name.
pub fn list_lanes(registry: &LaneRegistry) -> Vec<LaneSnapshot> {
    let mut snapshots: Vec<LaneSnapshot> = registry
        .lanes()
        .iter()
        .map(|lane| LaneSnapshot::of(lane))
        .collect();
    snapshots.sort_by(|a, b| a.name.cmp(&b.name));
    snapshots
}

/// Return a health payload. The registry is healthy while its default lane exists.
pub fn health(registry: &LaneRegistry) -> Health {
    Health {
        ok: registry.default_lane().is_some(),
        lanes: registry.len(),
    }
}
