//! Tokio runtime spawner implementation.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::core::LaneError;

/// Tokio-based spawner that runs lane loops and timers on a tokio runtime.
///
/// Holding the runtime handle lets lanes be fed from threads that are not
/// themselves inside the runtime.
#[derive(Debug, Clone)]
pub struct TokioSpawner {
    handle: Handle,
}

impl TokioSpawner {
    /// Create a new TokioSpawner from a tokio runtime handle.
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Spawner for the runtime the caller is running in.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use [`Self::try_current`] to avoid that.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Spawner for the current runtime, or an error outside of one.
    pub fn try_current() -> Result<Self, LaneError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| LaneError::Runtime(e.to_string()))
    }

    /// Spawn a future on the runtime.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(fut)
    }

    /// The wrapped runtime handle.
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }
}
