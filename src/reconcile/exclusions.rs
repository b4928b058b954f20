//! Combines user-driven and auto-detected exclusions into one set.
//!
//! The two partitions have different lifetimes: user exclusions live in the
//! session store and change only through explicit add/remove actions, while
//! auto exclusions are recomputed from scratch on every fetch and are never
//! persisted. Only the union matters for money totals; the partitions matter
//! for UI state (the include/exclude toggle acts on the user set alone).

use std::collections::HashSet;

/// The set of transaction IDs excluded from financial totals, split by
/// origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    user: HashSet<String>,
    auto: HashSet<String>,
}

impl ExclusionSet {
    /// Build the combined exclusion set for one request from the session's
    /// user exclusions and the detector's output for the current batch.
    pub fn resolve(user: impl IntoIterator<Item = String>, auto: HashSet<String>) -> Self {
        Self {
            user: user.into_iter().collect(),
            auto,
        }
    }

    /// Whether `id` is excluded from financial totals (member of either
    /// partition).
    pub fn is_excluded(&self, id: &str) -> bool {
        self.user.contains(id) || self.auto.contains(id)
    }

    /// Whether `id` was manually excluded by the user. Drives the
    /// include/exclude button state; never true for auto-only exclusions.
    pub fn is_user_excluded(&self, id: &str) -> bool {
        self.user.contains(id)
    }

    /// Whether `id` was auto-excluded as one leg of a detected transfer.
    pub fn is_auto_excluded(&self, id: &str) -> bool {
        self.auto.contains(id)
    }

    /// The number of manual exclusions in the session.
    pub fn user_count(&self) -> usize {
        self.user.len()
    }

    /// The number of distinct excluded IDs across both partitions.
    pub fn combined_count(&self) -> usize {
        self.user.union(&self.auto).count()
    }
}
