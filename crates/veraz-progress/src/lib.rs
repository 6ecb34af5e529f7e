//! # veraz-progress
//!
//! Verification counter and badge levels for veraz.
//!
//! ## Overview
//!
//! Each verification that produces a verdict increments a counter. Crossing
//! a badge threshold earns that badge; `ProgressTracker::record` reports the
//! moment that happens so the caller can celebrate it. The counter is kept
//! in a small JSON file through `ProgressStore`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veraz_progress::{ProgressStore, ProgressTracker};
//!
//! let store = ProgressStore::new("veraz-progress.json");
//! let mut tracker = ProgressTracker::new(store.load()?);
//! if let Some(badge) = tracker.record(&result) {
//!     println!("¡Nueva insignia: {}!", badge.name);
//! }
//! store.save(tracker.snapshot())?;
//! ```

pub mod badge;
pub mod store;
pub mod tracker;

pub use badge::{badge_info, Badge, BadgeProgress, BADGE_LEVELS};
pub use store::{ProgressSnapshot, ProgressStore};
pub use tracker::ProgressTracker;

// ── Tests ─────────────────────────────────────────────────────────────────────
