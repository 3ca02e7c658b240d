use crate::ShutdownCoordinator;

use tokio_util::sync::CancellationToken;

/// Per-task view of the shutdown signal
pub struct ShutdownGuard {
    token: CancellationToken,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            token: coordinator.token(),
        }
    }

    /// Wait for the shutdown signal. Returns immediately after shutdown.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    pub fn poll_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token for a subscription owned by this task
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}
