//! Lane lifecycle audit sinks.
//!
//! A registry with an attached sink records every lane creation, unit
//! enqueue, presentation, release and lane retirement.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::UnitId;
use crate::util::clock::now_ms;

/// Lifecycle step recorded by an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneAction {
    /// A lane was registered.
    LaneCreated,
    /// A unit was pushed into a lane.
    Enqueued,
    /// A unit was handed to its presenter.
    Presented,
    /// A unit's completion arrived and the lane moved on.
    Released,
    /// A lane was removed from the registry.
    LaneRetired,
}

/// Audit event structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneEvent {
    /// Lane name.
    pub lane: String,
    /// Unit involved, absent for lane-level events.
    pub unit_id: Option<UnitId>,
    /// Action taken.
    pub action: LaneAction,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Audit sink abstraction.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: LaneEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: Mutex<VecDeque<LaneEvent>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(max_events.min(1024))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<LaneEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Stored events for one lane, oldest first.
    pub fn events_for(&self, lane: &str) -> Vec<LaneEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.lane == lane)
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: LaneEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Helper to build an audit event stamped with the current time.
pub fn build_lane_event(
    lane: impl Into<String>,
    unit_id: Option<UnitId>,
    action: LaneAction,
) -> LaneEvent {
    LaneEvent {
        lane: lane.into(),
        unit_id,
        action,
        created_at_ms: now_ms(),
    }
}
