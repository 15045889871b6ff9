//! Shared fixtures for lane integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use overlay_lanes::core::{Completion, Priority, QueueElement};
use overlay_lanes::presenter::{ExitTransition, Mounted, MountedRoot, OverlayHandle, Renderer, TransitionDone};
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

/// A unit handed to its presenter: label, completion, and when it happened.
pub struct Presented {
    pub label: String,
    pub completion: Completion,
    pub at: Instant,
}

/// Unit that reports its presentation on `tx` and leaves releasing to the test.
pub fn recording_unit(
    label: impl Into<String>,
    priority: Priority,
    tx: &UnboundedSender<Presented>,
) -> QueueElement {
    let label = label.into();
    let tx = tx.clone();
    QueueElement::new(move |completion: Completion| {
        let _ = tx.send(Presented {
            label,
            completion,
            at: Instant::now(),
        });
    })
    .with_priority(priority)
}

/// Renderer that logs mount, exit transition and destroy steps.
#[derive(Clone, Default)]
pub struct TestRenderer {
    pub log: Arc<Mutex<Vec<String>>>,
    pub lose_transition: bool,
    pub dismiss_on_mount: bool,
}

impl TestRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_transition() -> Self {
        Self {
            lose_transition: true,
            ..Self::default()
        }
    }

    /// Renderer whose content dismisses itself while it is being mounted.
    pub fn dismissing_on_mount() -> Self {
        Self {
            dismiss_on_mount: true,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn mounted(&self, label: &str) -> bool {
        self.log.lock().iter().any(|e| e == &format!("mount:{label}"))
    }
}

struct TestRoot {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl MountedRoot for TestRoot {
    fn destroy(self: Box<Self>) {
        self.log.lock().push(format!("destroy:{}", self.label));
    }
}

struct TestTransition {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl ExitTransition for TestTransition {
    fn animate_out(self: Box<Self>, done: TransitionDone) {
        self.log.lock().push(format!("animate_out:{}", self.label));
        done();
    }
}

impl Renderer<&'static str> for TestRenderer {
    fn mount(&self, content: &'static str, handle: OverlayHandle) -> Mounted {
        self.log.lock().push(format!("mount:{content}"));
        if self.dismiss_on_mount {
            handle.dismiss();
        }
        let mounted = Mounted::new(TestRoot {
            label: content,
            log: Arc::clone(&self.log),
        });
        if self.lose_transition {
            mounted
        } else {
            mounted.with_transition(TestTransition {
                label: content,
                log: Arc::clone(&self.log),
            })
        }
    }
}
