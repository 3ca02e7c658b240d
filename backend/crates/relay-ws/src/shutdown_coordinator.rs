use crate::ShutdownGuard;

use tokio_util::sync::CancellationToken;

/// Graceful shutdown coordinator.
///
/// Owns the root cancellation token. The queue dispatcher runs on the root
/// token and every subscription token is a child of it, so a single
/// `shutdown()` stops dispatching and ends every streaming session.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// The root token, for long-lived tasks that stop on shutdown
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// A token cancelled on shutdown that can also be cancelled on its own
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Trigger shutdown (call this from the signal handler)
    pub fn shutdown(&self) {
        if !self.token.is_cancelled() {
            log::info!("Shutdown signal received, notifying all subsystems");
        }
        self.token.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
