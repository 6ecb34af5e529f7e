//! Counting verifications and announcing newly earned badges.

use chrono::Utc;
use tracing::info;

use veraz_contracts::result::VerificationResult;

use crate::{
    badge::{badge_info, Badge, BadgeProgress},
    store::ProgressSnapshot,
};

/// Tracks the verification count for one user.
///
/// Only results carrying a verdict are counted; error results leave the
/// count untouched.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    snapshot: ProgressSnapshot,
}

impl ProgressTracker {
    pub fn new(snapshot: ProgressSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn progress(&self) -> BadgeProgress {
        badge_info(self.snapshot.verification_count)
    }

    /// Count `result` and return the badge it earned, if the current badge
    /// changed as a result.
    pub fn record(&mut self, result: &VerificationResult) -> Option<&'static Badge> {
        if result.is_error() {
            return None;
        }

        let old_count = self.snapshot.verification_count;
        let new_count = old_count.saturating_add(1);
        self.snapshot.verification_count = new_count;
        self.snapshot.last_verified_at = Some(Utc::now());

        let old_badge = badge_info(old_count).current;
        let new_badge = badge_info(new_count).current?;

        if old_badge.map(|b| b.name) == Some(new_badge.name) {
            return None;
        }

        info!(
            badge = new_badge.name,
            verification_count = new_count,
            "new badge earned"
        );
        Some(new_badge)
    }
}
