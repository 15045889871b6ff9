//! # Overlay Lanes
//!
//! Priority-ordered, debounced presentation lanes for on-screen overlays.
//!
//! A lane presents one unit at a time. Every push re-buckets the pending
//! units into `high ++ default ++ low` while keeping arrival order inside a
//! tier, then schedules a short debounced start so a burst of submissions is
//! fully ordered before the first one is popped. The run-loop waits out
//! `max(unit delay, lane minimum delay)`, hands the unit to its presenter and
//! blocks until the presenter signals completion.
//!
//! Lanes live in a [`LaneRegistry`](core::LaneRegistry). A lane created on
//! demand retires itself once it drains unless it is marked
//! `preserve_when_empty`; the registry's default lane always is.
//!
//! ## Scheduling raw units
//!
//! ```rust,ignore
//! use overlay_lanes::core::{Completion, LaneRegistry, Priority, QueueElement};
//! use overlay_lanes::runtime::TokioSpawner;
//!
//! let registry = LaneRegistry::new(TokioSpawner::current());
//! registry.enqueue(
//!     Some("promos"),
//!     QueueElement::new(|done: Completion| {
//!         // show something, then release the lane once it is gone
//!         done.signal();
//!     })
//!     .with_priority(Priority::High),
//! )?;
//! ```
//!
//! ## Presenting overlays
//!
//! ```rust,ignore
//! use overlay_lanes::presenter::{enqueue_overlay, OverlayOptions};
//!
//! let handle = enqueue_overlay(
//!     &registry,
//!     renderer.clone(), // implements Renderer<MyContent>
//!     content,
//!     OverlayOptions::new().lane("onboarding").on_dismissed(|| println!("gone")),
//! )?
//! .await?;
//! handle.dismiss();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Lanes, the registry, units and lifecycle auditing.
pub mod core;
/// Configuration models for lanes and the registry.
pub mod config;
/// Builders to construct a registry from configuration.
pub mod builders;
/// Rendering seam, overlay handles and submission.
pub mod presenter;
/// Runtime adapters and diagnostics snapshots.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::core::{
    Completion, Lane, LaneError, LaneRegistry, Priority, QueueElement, DEFAULT_LANE_NAME,
};
pub use crate::presenter::{
    enqueue_overlay, show_overlay, OverlayHandle, OverlayOptions, PendingOverlay,
};
