/// Limits applied when a streaming session is registered
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    /// Maximum concurrently attached sessions
    pub max_total: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self { max_total: 100 }
    }
}
