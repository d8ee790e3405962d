//! Migration guard
//!
//! A shared on/off switch for lazy load rules. Bulk migrations turn it on for
//! exactly the duration of their run through [`MigrationGuard::activate`];
//! load rules only ever read it.
//!
//! Clones share one flag. Two bulk runs on the same guard at the same time are
//! not supported: whichever finishes first turns the guard off for both.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

/// Observable state of a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Load rules are no-ops
    Inactive,
    /// Load rules inspect and may rewrite matching loads
    Active,
}

/// Shared flag gating lazy migration rules
#[derive(Debug, Clone, Default)]
pub struct MigrationGuard {
    enabled: Arc<AtomicBool>,
}

impl MigrationGuard {
    /// Create an inactive guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether load rules should run
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Set the flag directly
    ///
    /// Prefer [`activate`](Self::activate), which cannot leave the guard on.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Current state
    pub fn state(&self) -> GuardState {
        if self.is_enabled() {
            GuardState::Active
        } else {
            GuardState::Inactive
        }
    }

    /// Turn the guard on until the returned scope is dropped
    ///
    /// The scope turns the guard off on every exit path: normal return, early
    /// `?` return and unwinding panic.
    #[must_use = "the guard turns off again as soon as the scope is dropped"]
    pub fn activate(&self) -> GuardScope {
        if self.enabled.swap(true, Ordering::SeqCst) {
            warn!(
                target: "docmigrate::migration",
                "Migration guard was already active; concurrent bulk migrations are unsupported"
            );
        }
        debug!(target: "docmigrate::migration", "Migration guard activated");
        GuardScope {
            guard: self.clone(),
        }
    }
}

/// Keeps a [`MigrationGuard`] active while alive
#[derive(Debug)]
pub struct GuardScope {
    guard: MigrationGuard,
}

impl Drop for GuardScope {
    fn drop(&mut self) {
        self.guard.set_enabled(false);
        debug!(target: "docmigrate::migration", "Migration guard released");
    }
}
