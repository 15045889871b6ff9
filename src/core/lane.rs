//! A named lane: priority-bucketed pending units plus a serialized run-loop.
//!
//! Each push re-buckets the pending units into `high ++ default ++ low`,
//! keeping the relative order inside every tier, and schedules a debounced
//! start attempt. The run-loop presents one unit at a time and waits for its
//! completion before popping the next.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::LaneConfig;
use crate::core::{
    build_lane_event, AuditSink, Completion, LaneAction, Priority, QueueElement, UnitId,
};
use crate::runtime::TokioSpawner;
use crate::util::Debouncer;

/// Receives a lane's idle notification.
pub trait LaneDelegate: Send + Sync {
    /// Called each time the run-loop stops, whether the lane drained or was paused.
    fn on_stop(&self, lane: &Arc<Lane>);
}

struct LaneState {
    pending: VecDeque<QueueElement>,
    running: bool,
}

#[derive(Debug, Clone, Copy)]
struct LaneTimings {
    minimum_delay: Duration,
    settle_delay: Duration,
}

/// One independently scheduled lane.
pub struct Lane {
    name: String,
    state: Mutex<LaneState>,
    timings: Mutex<LaneTimings>,
    paused: AtomicBool,
    preserve_when_empty: AtomicBool,
    wake: Debouncer,
    spawner: TokioSpawner,
    delegate: Option<Weak<dyn LaneDelegate>>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl Lane {
    /// Create a standalone lane that reports to nobody when it stops.
    ///
    /// Lanes meant to retire themselves are created through
    /// [`LaneRegistry::add_lane`](crate::core::LaneRegistry::add_lane).
    pub fn new(name: impl Into<String>, config: &LaneConfig, spawner: TokioSpawner) -> Arc<Self> {
        Self::build(name.into(), config, spawner, None, None)
    }

    /// Create a lane that notifies `delegate` whenever its run-loop stops.
    pub(crate) fn with_delegate(
        name: impl Into<String>,
        config: &LaneConfig,
        spawner: TokioSpawner,
        delegate: Weak<dyn LaneDelegate>,
    ) -> Arc<Self> {
        Self::build(name.into(), config, spawner, Some(delegate), None)
    }

    pub(crate) fn build(
        name: String,
        config: &LaneConfig,
        spawner: TokioSpawner,
        delegate: Option<Weak<dyn LaneDelegate>>,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            state: Mutex::new(LaneState {
                pending: VecDeque::new(),
                running: false,
            }),
            timings: Mutex::new(LaneTimings {
                minimum_delay: config.minimum_delay(),
                settle_delay: config.settle_delay(),
            }),
            paused: AtomicBool::new(config.paused),
            preserve_when_empty: AtomicBool::new(config.preserve_when_empty),
            wake: Debouncer::new(),
            spawner,
            delegate,
            audit,
        })
    }

    /// Lane name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of units waiting to be presented. The unit on screen is not counted.
    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Whether no unit is waiting to be presented.
    pub fn is_empty(&self) -> bool {
        self.state.lock().pending.is_empty()
    }

    /// Whether the run-loop is currently draining the lane.
    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Whether the run-loop is stopped and nothing is pending.
    pub fn is_drained(&self) -> bool {
        let state = self.state.lock();
        !state.running && state.pending.is_empty()
    }

    /// Priorities of the pending units, front first.
    pub fn pending_priorities(&self) -> Vec<Priority> {
        self.state
            .lock()
            .pending
            .iter()
            .map(QueueElement::priority)
            .collect()
    }

    /// Floor applied to every unit's own delay.
    pub fn minimum_delay(&self) -> Duration {
        self.timings.lock().minimum_delay
    }

    /// Set the floor applied to every unit's own delay.
    pub fn set_minimum_delay(&self, delay: Duration) {
        self.timings.lock().minimum_delay = delay;
    }

    /// Debounce window between a push and the run-loop start attempt.
    pub fn settle_delay(&self) -> Duration {
        self.timings.lock().settle_delay
    }

    /// Set the debounce window used by subsequent pushes.
    pub fn set_settle_delay(&self, delay: Duration) {
        self.timings.lock().settle_delay = delay;
    }

    /// Whether the lane stays registered after it drains.
    pub fn preserve_when_empty(&self) -> bool {
        self.preserve_when_empty.load(Ordering::Acquire)
    }

    /// Keep (or stop keeping) the lane registered after it drains.
    pub fn set_preserve_when_empty(&self, preserve: bool) {
        self.preserve_when_empty.store(preserve, Ordering::Release);
    }

    /// Whether the lane refuses to start new units.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Set the paused flag without waking the run-loop.
    ///
    /// A unit already on screen is never interrupted. Clearing the flag does
    /// not restart a stopped lane; call [`Self::resume`] or push a unit.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    /// Stop starting new units once the current one is released.
    pub fn pause(&self) {
        self.set_paused(true);
        debug!(lane = %self.name, "lane paused");
    }

    /// Clear the paused flag and try to start the run-loop right away.
    ///
    /// A debounced start still waiting from an earlier push is dropped.
    /// Returns whether a run-loop was started.
    pub fn resume(self: &Arc<Self>) -> bool {
        self.set_paused(false);
        let superseded = self.wake.cancel();
        debug!(lane = %self.name, superseded, "lane resumed");
        self.fire()
    }

    /// Insert a unit, re-bucket pending units by priority and schedule a debounced start.
    pub fn push(self: &Arc<Self>, element: QueueElement) {
        let unit_id = element.id();
        let priority = element.priority();
        let depth = {
            let mut state = self.state.lock();
            let pending = std::mem::take(&mut state.pending);
            state.pending = rebucket(pending, element);
            state.pending.len()
        };
        debug!(lane = %self.name, %unit_id, ?priority, depth, "unit enqueued");
        self.record(Some(unit_id), LaneAction::Enqueued);
        self.schedule_fire();
    }

    /// Start the run-loop unless it is running, the lane is empty, or paused.
    ///
    /// Returns whether a run-loop was started.
    pub fn fire(self: &Arc<Self>) -> bool {
        {
            let mut state = self.state.lock();
            if state.running || state.pending.is_empty() || self.is_paused() {
                return false;
            }
            state.running = true;
        }
        debug!(lane = %self.name, "run-loop started");
        let lane = Arc::clone(self);
        self.spawner.spawn(async move { lane.run().await });
        true
    }

    fn schedule_fire(self: &Arc<Self>) {
        let lane = Arc::clone(self);
        self.wake.schedule(&self.spawner, self.settle_delay(), move || {
            lane.fire();
        });
    }

    async fn run(self: Arc<Self>) {
        while let Some(element) = self.next_unit() {
            self.present(element).await;
        }
        debug!(lane = %self.name, paused = self.is_paused(), "run-loop stopped");
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            delegate.on_stop(&self);
        }
    }

    /// Pop the front unit, or clear `running` when the loop has to stop.
    fn next_unit(&self) -> Option<QueueElement> {
        let mut state = self.state.lock();
        let next = if self.is_paused() {
            None
        } else {
            state.pending.pop_front()
        };
        if next.is_none() {
            state.running = false;
        }
        next
    }

    async fn present(&self, element: QueueElement) {
        let delay = element.delay().max(self.minimum_delay());
        let (unit_id, presenter) = element.into_presenter();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (completion, released) = Completion::channel(unit_id);
        debug!(lane = %self.name, %unit_id, ?delay, "presenting unit");
        self.record(Some(unit_id), LaneAction::Presented);
        presenter.present(completion);

        if released.await.is_err() {
            warn!(
                lane = %self.name,
                %unit_id,
                "completion dropped without being signalled; releasing unit"
            );
        }
        debug!(lane = %self.name, %unit_id, "unit released");
        self.record(Some(unit_id), LaneAction::Released);
    }

    pub(crate) fn record(&self, unit_id: Option<UnitId>, action: LaneAction) {
        if let Some(audit) = &self.audit {
            audit.record(build_lane_event(&self.name, unit_id, action));
        }
    }
}

impl fmt::Debug for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Lane")
            .field("name", &self.name)
            .field("pending", &state.pending.len())
            .field("running", &state.running)
            .field("paused", &self.is_paused())
            .field("preserve_when_empty", &self.preserve_when_empty())
            .finish_non_exhaustive()
    }
}

/// Partition `pending` plus `element` into `high ++ default ++ low`.
///
/// Units keep their relative order inside a tier; `element` lands last in its tier.
pub(crate) fn rebucket(
    pending: VecDeque<QueueElement>,
    element: QueueElement,
) -> VecDeque<QueueElement> {
    let mut highs = VecDeque::with_capacity(pending.len() + 1);
    let mut defaults = Vec::new();
    let mut lows = Vec::new();

    for unit in pending.into_iter().chain(std::iter::once(element)) {
        match unit.priority() {
            Priority::High => highs.push_back(unit),
            Priority::Default => defaults.push(unit),
            Priority::Low => lows.push(unit),
        }
    }
    highs.extend(defaults);
    highs.extend(lows);
    highs
}
