//! Tests for registry builders

use std::sync::Arc;
use std::time::Duration;

use overlay_lanes::builders::{build_registry, build_registry_from_lookup};
use overlay_lanes::config::{LaneConfig, RegistryConfig};
use overlay_lanes::core::{AuditSink, InMemoryAuditSink, LaneAction, LaneError};
use overlay_lanes::runtime::TokioSpawner;

#[tokio::test]
async fn test_build_registry_creates_configured_lanes() {
    let mut config = RegistryConfig::default();
    config.lanes.insert(
        "alerts".to_string(),
        LaneConfig {
            minimum_delay_ms: 250,
            preserve_when_empty: true,
            ..LaneConfig::default()
        },
    );
    let audit = Arc::new(InMemoryAuditSink::new(16));

    let registry = build_registry(
        &config,
        TokioSpawner::current(),
        Some(Arc::clone(&audit) as Arc<dyn AuditSink>),
    )
    .unwrap();

    let alerts = registry.find_lane("alerts").unwrap();
    assert_eq!(alerts.minimum_delay(), Duration::from_millis(250));
    assert!(alerts.preserve_when_empty());
    assert_eq!(registry.len(), 2);
    assert_eq!(audit.events_for("alerts")[0].action, LaneAction::LaneCreated);
}

#[tokio::test]
async fn test_build_registry_rejects_invalid_config() {
    let config = RegistryConfig {
        default_lane: String::new(),
        ..RegistryConfig::default()
    };
    let err = build_registry(&config, TokioSpawner::current(), None).unwrap_err();
    assert!(matches!(err, LaneError::InvalidConfig(_)));
}

#[tokio::test]
async fn test_default_lane_is_preserved_even_if_configured_otherwise() {
    let mut config = RegistryConfig::default();
    config.default_lane = "main".into();
    config.lanes.insert(
        "main".to_string(),
        LaneConfig {
            minimum_delay_ms: 30,
            preserve_when_empty: false,
            ..LaneConfig::default()
        },
    );

    let registry = build_registry(&config, TokioSpawner::current(), None).unwrap();
    let main = registry.default_lane().unwrap();
    assert_eq!(main.name(), "main");
    assert!(main.preserve_when_empty());
    assert_eq!(main.minimum_delay(), Duration::from_millis(30));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_build_registry_from_lookup() {
    let lookup = |key: &str| match key {
        "OVERLAY_LANES_DEFAULT_LANE" => Some("main".to_string()),
        "OVERLAY_LANES_MINIMUM_DELAY_MS" => Some("120".to_string()),
        _ => None,
    };
    let registry = build_registry_from_lookup(lookup, TokioSpawner::current(), None).unwrap();

    let main = registry.default_lane().unwrap();
    assert_eq!(main.name(), "main");
    assert_eq!(main.minimum_delay(), Duration::from_millis(120));
}

#[tokio::test]
async fn test_build_registry_from_lookup_reports_context() {
    let lookup = |key: &str| (key == "OVERLAY_LANES_SETTLE_DELAY_MS").then(|| "soon".to_string());
    let err = build_registry_from_lookup(lookup, TokioSpawner::current(), None).unwrap_err();

    assert_eq!(err.to_string(), "reading lane registry configuration");
    assert!(format!("{err:#}").contains("OVERLAY_LANES_SETTLE_DELAY_MS"));
}
