//! Tests for audit sink

use overlay_lanes::core::{build_lane_event, AuditSink, InMemoryAuditSink, LaneAction};
use uuid::Uuid;

#[test]
fn test_in_memory_audit_sink() {
    let sink = InMemoryAuditSink::new(10);
    let unit = Uuid::new_v4();

    sink.record(build_lane_event("lane1", Some(unit), LaneAction::Enqueued));
    sink.record(build_lane_event("lane2", None, LaneAction::LaneCreated));
    assert_eq!(sink.events().len(), 2);

    let events = sink.events_for("lane1");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].unit_id, Some(unit));
    assert_eq!(events[0].action, LaneAction::Enqueued);
}

#[test]
fn test_audit_sink_overflow() {
    let sink = InMemoryAuditSink::new(2);

    sink.record(build_lane_event("l1", None, LaneAction::LaneCreated));
    sink.record(build_lane_event("l2", None, LaneAction::LaneCreated));
    sink.record(build_lane_event("l3", None, LaneAction::LaneCreated));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].lane, "l2"); // First one popped
    assert_eq!(events[1].lane, "l3");
}

#[test]
fn test_zero_capacity_sink_stores_nothing() {
    let sink = InMemoryAuditSink::new(0);
    sink.record(build_lane_event("l1", None, LaneAction::LaneCreated));
    sink.record(build_lane_event("l1", None, LaneAction::LaneRetired));
    assert!(sink.events().is_empty());
}

#[test]
fn test_build_lane_event() {
    let event = build_lane_event("lane1", None, LaneAction::LaneRetired);

    assert_eq!(event.lane, "lane1");
    assert_eq!(event.unit_id, None);
    assert_eq!(event.action, LaneAction::LaneRetired);
    assert!(event.created_at_ms > 0);
}

#[test]
fn test_lane_event_serializes_action_snake_case() {
    let event = build_lane_event("lane1", None, LaneAction::LaneCreated);
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["action"], "lane_created");
}
