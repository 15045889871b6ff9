//! Cancel-and-reschedule timer used to coalesce bursts of wake requests.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::runtime::TokioSpawner;

/// Runs a callback after a delay, replacing any callback still waiting.
///
/// Only the most recently scheduled callback fires. A replaced callback is
/// aborted while it sleeps; once its delay elapsed it runs to completion.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create an idle debouncer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` after `delay`, cancelling the previous one if it has not fired.
    pub fn schedule<F>(&self, spawner: &TokioSpawner, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = self.pending.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(spawner.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Cancel the scheduled callback, if any. Returns whether one was waiting.
    pub(crate) fn cancel(&self) -> bool {
        self.pending.lock().take().is_some_and(|handle| {
            let waiting = !handle.is_finished();
            handle.abort();
            waiting
        })
    }

    /// Whether a scheduled callback has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
