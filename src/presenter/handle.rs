//! Handles used to dismiss a presented overlay.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::{Completion, UnitId};
use crate::presenter::Mounted;

/// Callback fired after an overlay has been torn down.
pub type DismissCallback = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct HandleState {
    mounted: Option<Mounted>,
    completion: Option<Completion>,
    on_dismissed: Option<DismissCallback>,
    dismissed: bool,
    // Set when dismissal arrives before the renderer's view is attached.
    dismiss_requested: bool,
    deferred_on_dismiss: Option<DismissCallback>,
}

struct Teardown {
    mounted: Mounted,
    completion: Option<Completion>,
    on_dismissed: Option<DismissCallback>,
    on_dismiss: Option<DismissCallback>,
}

impl HandleState {
    fn begin_teardown(&mut self, on_dismiss: Option<DismissCallback>) -> Option<Teardown> {
        let mounted = self.mounted.take()?;
        self.dismissed = true;
        Some(Teardown {
            mounted,
            completion: self.completion.take(),
            on_dismissed: self.on_dismissed.take(),
            on_dismiss,
        })
    }
}

struct HandleInner {
    id: UnitId,
    state: Mutex<HandleState>,
}

/// Caller-facing token for one presented overlay.
///
/// Clones refer to the same overlay. Only the first dismissal does anything.
#[derive(Clone)]
pub struct OverlayHandle {
    inner: Arc<HandleInner>,
}

impl OverlayHandle {
    pub(crate) fn new(id: UnitId) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id,
                state: Mutex::new(HandleState::default()),
            }),
        }
    }

    /// Handle for an overlay presented outside any lane.
    pub(crate) fn detached() -> Self {
        Self::new(Uuid::new_v4())
    }

    /// Identifier of the presented unit.
    pub fn id(&self) -> UnitId {
        self.inner.id
    }

    /// Whether the overlay has been dismissed (its teardown may still be running).
    pub fn is_dismissed(&self) -> bool {
        let state = self.inner.state.lock();
        state.dismissed || state.dismiss_requested
    }

    /// Whether the overlay is mounted and not yet dismissed.
    pub fn is_presented(&self) -> bool {
        let state = self.inner.state.lock();
        state.mounted.is_some() && !state.dismissed
    }

    /// Store the lane completion and the caller's notification before mounting.
    pub(crate) fn arm(&self, completion: Option<Completion>, on_dismissed: Option<DismissCallback>) {
        let mut state = self.inner.state.lock();
        state.completion = completion;
        state.on_dismissed = on_dismissed;
    }

    /// Store the mounted view, running a dismissal that arrived while mounting.
    pub(crate) fn attach(&self, mounted: Mounted) {
        let teardown = {
            let mut state = self.inner.state.lock();
            state.mounted = Some(mounted);
            if !state.dismiss_requested || state.dismissed {
                return;
            }
            let on_dismiss = state.deferred_on_dismiss.take();
            state.begin_teardown(on_dismiss)
        };
        if let Some(teardown) = teardown {
            debug!(unit_id = %self.inner.id, "running dismissal requested during mount");
            self.tear_down(teardown);
        }
    }

    /// Dismiss the overlay. Calling it again has no effect.
    ///
    /// A dismissal issued while the renderer is still mounting takes effect
    /// as soon as the view is attached.
    pub fn dismiss(&self) {
        self.dismiss_inner(None);
    }

    /// Dismiss the overlay and call `on_dismiss` once teardown finished.
    ///
    /// `on_dismiss` is dropped without being called if the overlay was
    /// already dismissed.
    pub fn dismiss_with<F>(&self, on_dismiss: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.dismiss_inner(Some(Box::new(on_dismiss)));
    }

    fn dismiss_inner(&self, on_dismiss: Option<DismissCallback>) {
        let teardown = {
            let mut state = self.inner.state.lock();
            if state.dismissed || state.dismiss_requested {
                return;
            }
            if state.mounted.is_none() {
                state.dismiss_requested = true;
                state.deferred_on_dismiss = on_dismiss;
                return;
            }
            state.begin_teardown(on_dismiss)
        };
        if let Some(teardown) = teardown {
            self.tear_down(teardown);
        }
    }

    fn tear_down(&self, teardown: Teardown) {
        let Teardown {
            mounted,
            completion,
            on_dismissed,
            on_dismiss,
        } = teardown;
        let id = self.inner.id;
        let (root, transition) = mounted.into_parts();
        let cleanup = move || {
            root.destroy();
            if let Some(callback) = on_dismissed {
                callback();
            }
            if let Some(completion) = completion {
                completion.signal();
            }
            if let Some(callback) = on_dismiss {
                callback();
            }
            debug!(unit_id = %id, "overlay torn down");
        };

        match transition {
            Some(transition) => transition.animate_out(Box::new(cleanup)),
            None => {
                warn!(unit_id = %id, "dismissing overlay without exit transition because its reference was lost");
                cleanup();
            }
        }
    }
}

impl std::fmt::Debug for OverlayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayHandle")
            .field("id", &self.inner.id)
            .field("dismissed", &self.is_dismissed())
            .finish_non_exhaustive()
    }
}
