//! Tests for configuration validation

use std::collections::HashMap;

use overlay_lanes::config::{LaneConfig, RegistryConfig};
use overlay_lanes::DEFAULT_LANE_NAME;

#[test]
fn test_registry_config_defaults() {
    let config = RegistryConfig::default();
    assert_eq!(config.default_lane, DEFAULT_LANE_NAME);
    assert!(config.lanes.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_registry_config_empty_default_lane() {
    let config = RegistryConfig {
        default_lane: String::new(),
        ..RegistryConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_registry_config_empty_lane_name() {
    let mut lanes = HashMap::new();
    lanes.insert(String::new(), LaneConfig::default());
    let config = RegistryConfig {
        lanes,
        ..RegistryConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_registry_config_invalid_lane_entry() {
    let mut lanes = HashMap::new();
    lanes.insert(
        "alerts".to_string(),
        LaneConfig {
            settle_delay_ms: 0,
            ..LaneConfig::default()
        },
    );
    let config = RegistryConfig {
        lanes,
        ..RegistryConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.contains("alerts"));
}

#[test]
fn test_registry_config_from_json() {
    let json = r#"{
        "default_lane": "main",
        "lane_defaults": { "minimum_delay_ms": 50 },
        "lanes": {
            "alerts": {
                "minimum_delay_ms": 200,
                "preserve_when_empty": true
            }
        }
    }"#;

    let config = RegistryConfig::from_json_str(json).unwrap();
    assert_eq!(config.default_lane, "main");
    assert_eq!(config.lane_defaults.minimum_delay_ms, 50);
    assert_eq!(config.lane_defaults.settle_delay_ms, 10);
    let alerts = config.lane_config("alerts");
    assert_eq!(alerts.minimum_delay_ms, 200);
    assert!(alerts.preserve_when_empty);
    assert!(!alerts.paused);
}

#[test]
fn test_registry_config_from_bad_json() {
    assert!(RegistryConfig::from_json_str("{ not json").is_err());
    assert!(RegistryConfig::from_json_str(r#"{"default_lane": ""}"#).is_err());
}
