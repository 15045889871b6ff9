//! Queued and immediate overlay presentation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;

use crate::core::{Completion, LaneError, LaneRegistry, Priority, QueueElement, UnitId};
use crate::presenter::{DismissCallback, OverlayHandle, Renderer};

/// Options for [`enqueue_overlay`].
#[derive(Default)]
pub struct OverlayOptions {
    /// Target lane. The registry's default lane is used when unset; an unknown
    /// name creates the lane.
    pub lane_name: Option<String>,
    /// Priority tier inside the lane.
    pub priority: Priority,
    /// Delay before presenting. The lane's minimum delay still applies.
    pub delay: Duration,
    /// Notified once the overlay has been dismissed and torn down.
    pub on_dismissed: Option<DismissCallback>,
}

impl OverlayOptions {
    /// Options targeting the default lane with default priority.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target the named lane.
    #[must_use]
    pub fn lane(mut self, name: impl Into<String>) -> Self {
        self.lane_name = Some(name.into());
        self
    }

    /// Set the priority tier.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the delay before presenting.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Get notified when the overlay is later dismissed.
    #[must_use]
    pub fn on_dismissed<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_dismissed = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for OverlayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayOptions")
            .field("lane_name", &self.lane_name)
            .field("priority", &self.priority)
            .field("delay", &self.delay)
            .field("on_dismissed", &self.on_dismissed.is_some())
            .finish()
    }
}

/// A queued overlay that resolves to its handle once it is on screen.
///
/// The unit is already in its lane when this value exists; dropping it does
/// not withdraw the overlay.
#[must_use = "the overlay is queued either way; await this to get its handle"]
#[derive(Debug)]
pub struct PendingOverlay {
    unit_id: UnitId,
    lane: String,
    presented: oneshot::Receiver<OverlayHandle>,
}

impl PendingOverlay {
    /// Identifier of the queued unit; matches the eventual handle's id.
    pub const fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    /// Name of the lane the overlay was queued on.
    pub fn lane(&self) -> &str {
        &self.lane
    }
}

impl Future for PendingOverlay {
    type Output = Result<OverlayHandle, LaneError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.presented)
            .poll(cx)
            .map(|result| result.map_err(|_| LaneError::Abandoned))
    }
}

/// Queue `content` on a lane right away; await the result for its handle.
///
/// The unit is pushed before this returns, so submission order and priority
/// take effect at the call, not at the first poll. The returned future
/// resolves once the overlay is actually on screen. Dismissing its handle
/// releases the lane so the next unit can be presented.
///
/// # Errors
///
/// [`LaneError::EmptyName`] for an empty lane name. The pending overlay
/// resolves to [`LaneError::Abandoned`] if the unit is dropped before it is
/// presented.
pub fn enqueue_overlay<C, R>(
    registry: &LaneRegistry,
    renderer: Arc<R>,
    content: C,
    options: OverlayOptions,
) -> Result<PendingOverlay, LaneError>
where
    C: Send + 'static,
    R: Renderer<C>,
{
    let OverlayOptions {
        lane_name,
        priority,
        delay,
        on_dismissed,
    } = options;
    let (presented_tx, presented_rx) = oneshot::channel();

    let element = QueueElement::new(move |completion: Completion| {
        let handle = OverlayHandle::new(completion.unit_id());
        handle.arm(Some(completion), on_dismissed);
        let mounted = renderer.mount(content, handle.clone());
        handle.attach(mounted);
        // The caller may have stopped waiting; the overlay stays dismissible through its content.
        let _ = presented_tx.send(handle);
    })
    .with_priority(priority)
    .with_delay(delay);

    let unit_id = element.id();
    let lane = registry.enqueue(lane_name.as_deref(), element)?;
    debug!(lane = lane.name(), %unit_id, "overlay queued");

    Ok(PendingOverlay {
        unit_id,
        lane: lane.name().to_string(),
        presented: presented_rx,
    })
}

/// Present `content` immediately, outside of every lane.
///
/// The handle dismisses this overlay only; no lane is waiting on it.
pub fn show_overlay<C, R>(renderer: &R, content: C) -> OverlayHandle
where
    R: Renderer<C> + ?Sized,
{
    let handle = OverlayHandle::detached();
    let mounted = renderer.mount(content, handle.clone());
    handle.attach(mounted);
    debug!(unit_id = %handle.id(), "overlay shown");
    handle
}
