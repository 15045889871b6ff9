//! Presentable units and their completion signal.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Identifier assigned to every unit when it is created.
pub type UnitId = Uuid;

/// Priority tier used to bucket pending units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Presented before every other tier.
    High,
    /// The tier used when a caller does not choose one.
    #[default]
    Default,
    /// Presented after every other tier.
    Low,
}

/// One-shot signal a presenter fires once its unit has been dismissed.
///
/// Consuming `signal` makes a second release impossible. Dropping the
/// completion without signalling also releases the lane, but logs a warning.
pub struct Completion {
    unit_id: UnitId,
    tx: oneshot::Sender<()>,
}

impl Completion {
    pub(crate) fn channel(unit_id: UnitId) -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { unit_id, tx }, rx)
    }

    /// Identifier of the unit this completion releases.
    pub const fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    /// Release the lane so it can present its next unit.
    pub fn signal(self) {
        // The lane may already be gone; nothing is waiting in that case.
        let _ = self.tx.send(());
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("unit_id", &self.unit_id)
            .finish_non_exhaustive()
    }
}

/// The external presenter callback for one unit.
///
/// Invoked exactly once when the unit reaches the front of its lane. The
/// implementation must eventually call [`Completion::signal`].
pub trait Present: Send + 'static {
    /// Present the unit, handing over the signal that releases the lane.
    fn present(self: Box<Self>, completion: Completion);
}

impl<F> Present for F
where
    F: FnOnce(Completion) + Send + 'static,
{
    fn present(self: Box<Self>, completion: Completion) {
        (*self)(completion);
    }
}

/// A schedulable unit: presenter callback plus priority and delay.
pub struct QueueElement {
    id: UnitId,
    present: Box<dyn Present>,
    priority: Priority,
    delay: Duration,
}

impl QueueElement {
    /// Wrap a presenter callback with default priority and no delay.
    pub fn new<P: Present>(present: P) -> Self {
        Self {
            id: Uuid::new_v4(),
            present: Box::new(present),
            priority: Priority::Default,
            delay: Duration::ZERO,
        }
    }

    /// Set the priority tier.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the delay waited before presenting. The lane's minimum delay still applies.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Unit identifier.
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Priority tier.
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Requested delay.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub(crate) fn into_presenter(self) -> (UnitId, Box<dyn Present>) {
        (self.id, self.present)
    }
}

impl fmt::Debug for QueueElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueElement")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
