use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

/// Tracks whether at least one streaming session is attached.
///
/// A counter rather than a flag: with two overlapping sessions, the first
/// disconnect must not report the relay as unattended.
pub struct PresenceTracker {
    sessions: Arc<AtomicUsize>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Call once at the start of every streaming session
    pub fn connected(&self) {
        let current = self.sessions.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Session attached ({current} active)");
    }

    /// Call once per session end; never goes below zero
    pub fn disconnected(&self) {
        let previous = self
            .sessions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)))
            .unwrap_or(0);
        debug!("Session detached ({} active)", previous.saturating_sub(1));
    }

    pub fn is_connected(&self) -> bool {
        self.sessions.load(Ordering::SeqCst) > 0
    }

    pub fn session_count(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PresenceTracker {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}
