//! Lane and registry configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_LANE_NAME;

/// Settle window applied when a lane is not configured otherwise.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 10;

const ENV_DEFAULT_LANE: &str = "OVERLAY_LANES_DEFAULT_LANE";
const ENV_SETTLE_DELAY_MS: &str = "OVERLAY_LANES_SETTLE_DELAY_MS";
const ENV_MINIMUM_DELAY_MS: &str = "OVERLAY_LANES_MINIMUM_DELAY_MS";

/// Per-lane settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Floor applied to every unit's own delay, in milliseconds.
    pub minimum_delay_ms: u64,
    /// Debounce window between a push and the run-loop start attempt, in milliseconds.
    pub settle_delay_ms: u64,
    /// Keep the lane registered after it drains.
    pub preserve_when_empty: bool,
    /// Create the lane paused.
    pub paused: bool,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            minimum_delay_ms: 0,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            preserve_when_empty: false,
            paused: false,
        }
    }
}

impl LaneConfig {
    /// Minimum delay as a duration.
    pub const fn minimum_delay(&self) -> Duration {
        Duration::from_millis(self.minimum_delay_ms)
    }

    /// Settle window as a duration.
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Validate lane configuration values.
    pub fn validate(&self) -> Result<(), String> {
        // Without a settle window bursts are no longer reordered before the first pop.
        if self.settle_delay_ms == 0 {
            return Err("settle_delay_ms must be greater than 0".into());
        }
        Ok(())
    }
}

/// Root registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name of the lane used when a submission names none.
    pub default_lane: String,
    /// Settings for lanes created on demand without their own entry.
    pub lane_defaults: LaneConfig,
    /// Per-lane overrides, keyed by lane name.
    pub lanes: HashMap<String, LaneConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_lane: DEFAULT_LANE_NAME.to_string(),
            lane_defaults: LaneConfig::default(),
            lanes: HashMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Validate the default lane name and every lane entry.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_lane.is_empty() {
            return Err("default_lane cannot be empty".into());
        }
        self.lane_defaults
            .validate()
            .map_err(|e| format!("lane_defaults invalid: {e}"))?;
        for (name, lane) in &self.lanes {
            if name.is_empty() {
                return Err("lane names cannot be empty".into());
            }
            lane.validate()
                .map_err(|e| format!("lane `{name}` invalid: {e}"))?;
        }
        Ok(())
    }

    /// Settings for the named lane.
    pub fn lane_config(&self, name: &str) -> LaneConfig {
        self.lanes
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.lane_defaults.clone())
    }

    /// Parse registry configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the environment, loading a `.env` file if present.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, then validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(name) = lookup(ENV_DEFAULT_LANE) {
            cfg.default_lane = name;
        }
        if let Some(raw) = lookup(ENV_SETTLE_DELAY_MS) {
            cfg.lane_defaults.settle_delay_ms = parse_ms(ENV_SETTLE_DELAY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MINIMUM_DELAY_MS) {
            cfg.lane_defaults.minimum_delay_ms = parse_ms(ENV_MINIMUM_DELAY_MS, &raw)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_ms(key: &str, raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse()
        .map_err(|e| format!("{key} must be a millisecond count: {e}"))
}
