//! Directory of live lanes keyed by name.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::config::RegistryConfig;
use crate::core::{AuditSink, Lane, LaneAction, LaneDelegate, LaneError, QueueElement};
use crate::runtime::TokioSpawner;

/// Name of the lane that exists from registry construction onwards.
pub const DEFAULT_LANE_NAME: &str = "default_queue";

struct RegistryInner {
    lanes: RwLock<HashMap<String, Arc<Lane>>>,
    config: RegistryConfig,
    spawner: TokioSpawner,
    audit: Option<Arc<dyn AuditSink>>,
}

impl LaneDelegate for RegistryInner {
    fn on_stop(&self, lane: &Arc<Lane>) {
        let mut lanes = self.lanes.write();
        // A push that slipped in after the loop stopped keeps the lane alive,
        // and a stale loop must never remove a newer lane of the same name.
        let current = lanes
            .get(lane.name())
            .is_some_and(|registered| Arc::ptr_eq(registered, lane));
        if current && !lane.preserve_when_empty() && lane.is_drained() {
            lanes.remove(lane.name());
            drop(lanes);
            info!(lane = lane.name(), "retired drained lane");
            lane.record(None, LaneAction::LaneRetired);
        }
    }
}

/// Shared directory of lanes.
///
/// Cloning is cheap and every clone refers to the same lanes. The registry is
/// an ordinary value: build as many independent ones as needed.
#[derive(Clone)]
pub struct LaneRegistry {
    inner: Arc<RegistryInner>,
}

impl LaneRegistry {
    /// Registry with default configuration and the default lane in place.
    pub fn new(spawner: TokioSpawner) -> Self {
        Self::from_parts(spawner, RegistryConfig::default(), None)
    }

    /// Registry with validated configuration and an optional audit sink.
    pub fn with_config(
        spawner: TokioSpawner,
        config: RegistryConfig,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> Result<Self, LaneError> {
        config.validate().map_err(LaneError::InvalidConfig)?;
        Ok(Self::from_parts(spawner, config, audit))
    }

    fn from_parts(
        spawner: TokioSpawner,
        config: RegistryConfig,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> Self {
        let registry = Self {
            inner: Arc::new(RegistryInner {
                lanes: RwLock::new(HashMap::new()),
                config,
                spawner,
                audit,
            }),
        };
        {
            let mut lanes = registry.inner.lanes.write();
            registry.insert_lane(&mut lanes, registry.default_lane_name());
        }
        registry
    }

    /// Name of the lane used when a submission names none.
    pub fn default_lane_name(&self) -> &str {
        &self.inner.config.default_lane
    }

    /// The default lane. It is always preserved when empty, so it stays
    /// registered unless removed explicitly with [`Self::remove_lane`].
    pub fn default_lane(&self) -> Option<Arc<Lane>> {
        self.find_lane(self.default_lane_name())
    }

    /// Look up a live lane by name.
    pub fn find_lane(&self, name: &str) -> Option<Arc<Lane>> {
        self.inner.lanes.read().get(name).cloned()
    }

    /// Create and register a new lane.
    ///
    /// Fails if `name` is empty or already registered; the existing lane is untouched.
    pub fn add_lane(&self, name: &str) -> Result<Arc<Lane>, LaneError> {
        if name.is_empty() {
            return Err(LaneError::EmptyName);
        }
        let mut lanes = self.inner.lanes.write();
        if lanes.contains_key(name) {
            return Err(LaneError::AlreadyExists(name.to_string()));
        }
        Ok(self.insert_lane(&mut lanes, name))
    }

    /// Return the named lane, creating it if absent.
    pub fn lane_or_insert(&self, name: &str) -> Result<Arc<Lane>, LaneError> {
        if name.is_empty() {
            return Err(LaneError::EmptyName);
        }
        let mut lanes = self.inner.lanes.write();
        if let Some(lane) = lanes.get(name) {
            return Ok(Arc::clone(lane));
        }
        Ok(self.insert_lane(&mut lanes, name))
    }

    /// Remove the named lane. Units it still holds keep running to completion.
    pub fn remove_lane(&self, name: &str) {
        if name.is_empty() {
            warn!("lane name cannot be empty; remove_lane ignored");
            return;
        }
        let removed = self.inner.lanes.write().remove(name);
        if let Some(lane) = removed {
            info!(lane = name, "removed lane");
            lane.record(None, LaneAction::LaneRetired);
        }
    }

    /// Push a unit into the named lane (default lane when `None`), creating the lane if needed.
    ///
    /// Lookup and push happen under the registry lock, so a lane that is
    /// retiring can never swallow the unit.
    pub fn enqueue(
        &self,
        lane_name: Option<&str>,
        element: QueueElement,
    ) -> Result<Arc<Lane>, LaneError> {
        let name = lane_name.unwrap_or_else(|| self.default_lane_name());
        if name.is_empty() {
            return Err(LaneError::EmptyName);
        }
        let mut lanes = self.inner.lanes.write();
        let lane = match lanes.get(name) {
            Some(lane) => Arc::clone(lane),
            None => self.insert_lane(&mut lanes, name),
        };
        lane.push(element);
        Ok(lane)
    }

    /// Names of all live lanes, sorted.
    pub fn lane_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.lanes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of all live lanes.
    pub fn lanes(&self) -> Vec<Arc<Lane>> {
        self.inner.lanes.read().values().cloned().collect()
    }

    /// Number of live lanes.
    pub fn len(&self) -> usize {
        self.inner.lanes.read().len()
    }

    /// Whether no lane is registered, which only happens after removing the default lane.
    pub fn is_empty(&self) -> bool {
        self.inner.lanes.read().is_empty()
    }

    /// Configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    fn insert_lane(&self, lanes: &mut HashMap<String, Arc<Lane>>, name: &str) -> Arc<Lane> {
        let weak = Arc::downgrade(&self.inner);
        let delegate: Weak<dyn LaneDelegate> = weak;
        let lane = Lane::build(
            name.to_string(),
            &self.inner.config.lane_config(name),
            self.inner.spawner.clone(),
            Some(delegate),
            self.inner.audit.clone(),
        );
        if name == self.default_lane_name() {
            lane.set_preserve_when_empty(true);
        }
        lanes.insert(name.to_string(), Arc::clone(&lane));
        info!(lane = name, "created lane");
        lane.record(None, LaneAction::LaneCreated);
        lane
    }
}

impl std::fmt::Debug for LaneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaneRegistry")
            .field("default_lane", &self.default_lane_name())
            .field("lanes", &self.lane_names())
            .finish_non_exhaustive()
    }
}
