//! Lanes, the lane registry, units and lifecycle auditing.

pub mod audit;
pub mod error;
pub mod lane;
pub mod registry;
pub mod unit;

pub use audit::{build_lane_event, AuditSink, InMemoryAuditSink, LaneAction, LaneEvent};
pub use error::{AppResult, LaneError};
pub use lane::{Lane, LaneDelegate};
pub use registry::{LaneRegistry, DEFAULT_LANE_NAME};
pub use unit::{Completion, Present, Priority, QueueElement, UnitId};
