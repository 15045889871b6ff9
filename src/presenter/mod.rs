//! Rendering seam and the caller-facing submission API.
//!
//! The scheduler never looks at what an overlay is. A [`Renderer`] mounts
//! caller content and returns a [`Mounted`] view; the view may carry an
//! [`ExitTransition`] used for graceful teardown. Dismissal always ends with
//! [`MountedRoot::destroy`] followed by the release callbacks.

pub mod handle;
pub mod submit;

pub use handle::{DismissCallback, OverlayHandle};
pub use submit::{enqueue_overlay, show_overlay, OverlayOptions, PendingOverlay};

/// Callback invoked once an exit transition has finished.
pub type TransitionDone = Box<dyn FnOnce() + Send>;

/// External renderer that mounts content for display.
pub trait Renderer<C>: Send + Sync + 'static {
    /// Mount `content`. The handle lets the content dismiss itself.
    fn mount(&self, content: C, handle: OverlayHandle) -> Mounted;
}

/// The root of a mounted overlay.
pub trait MountedRoot: Send {
    /// Unmount the overlay.
    fn destroy(self: Box<Self>);
}

/// Exit transition run before the overlay is destroyed.
pub trait ExitTransition: Send {
    /// Animate the overlay out, then call `done` exactly once.
    fn animate_out(self: Box<Self>, done: TransitionDone);
}

/// A mounted overlay: its root plus the transition reference, if still alive.
pub struct Mounted {
    root: Box<dyn MountedRoot>,
    transition: Option<Box<dyn ExitTransition>>,
}

impl Mounted {
    /// Mounted overlay without an exit transition.
    pub fn new<R: MountedRoot + 'static>(root: R) -> Self {
        Self {
            root: Box::new(root),
            transition: None,
        }
    }

    /// Attach the transition used for graceful teardown.
    #[must_use]
    pub fn with_transition<T: ExitTransition + 'static>(mut self, transition: T) -> Self {
        self.transition = Some(Box::new(transition));
        self
    }

    /// Whether a transition reference is attached.
    pub const fn has_transition(&self) -> bool {
        self.transition.is_some()
    }

    pub(crate) fn into_parts(self) -> (Box<dyn MountedRoot>, Option<Box<dyn ExitTransition>>) {
        (self.root, self.transition)
    }
}

impl std::fmt::Debug for Mounted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mounted")
            .field("has_transition", &self.has_transition())
            .finish_non_exhaustive()
    }
}
