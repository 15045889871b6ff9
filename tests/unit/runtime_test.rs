//! Tests for runtime helpers and diagnostics snapshots

use overlay_lanes::core::LaneRegistry;
use overlay_lanes::runtime::{health, list_lanes, TokioSpawner};

#[test]
fn test_try_current_outside_runtime() {
    assert!(TokioSpawner::try_current().is_err());
}

#[test]
fn test_spawner_from_explicit_handle() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let spawner = TokioSpawner::new(runtime.handle().clone());
    let result = runtime.block_on(spawner.spawn(async { 21 * 2 }));
    assert_eq!(result.unwrap(), 42);
}

#[tokio::test]
async fn test_list_lanes_and_health() {
    let registry = LaneRegistry::new(TokioSpawner::try_current().unwrap());
    let lane = registry.add_lane("alpha").unwrap();
    lane.pause();

    let snapshots = list_lanes(&registry);
    let names: Vec<&str> = snapshots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "default_queue"]);
    assert!(snapshots[0].paused);
    assert!(!snapshots[0].preserve_when_empty);
    assert!(snapshots[1].preserve_when_empty);

    let status = health(&registry);
    assert!(status.ok);
    assert_eq!(status.lanes, 2);

    registry.remove_lane("default_queue");
    assert!(!health(&registry).ok);
}
