use std::error::Error;

pub type CommandResult = std::result::Result<String, Box<dyn Error + Send + Sync>>;

/// Synchronous pass-through to the external command endpoint.
///
/// Called on the blocking thread pool; implementations may block.
pub trait CommandRequester: Send + Sync + 'static {
    fn send_command(&self, message: &str) -> CommandResult;
}

impl<F> CommandRequester for F
where
    F: Fn(&str) -> CommandResult + Send + Sync + 'static,
{
    fn send_command(&self, message: &str) -> CommandResult {
        self(message)
    }
}
