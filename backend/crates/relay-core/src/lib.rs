pub mod backlog_drain;
pub mod bounded_buffer;
pub mod dispatch_config;
pub mod error;
pub mod presence_tracker;
pub mod queue;
pub mod queue_stats;
pub mod subscription;
pub mod subscription_id;

mod dispatcher;

pub use backlog_drain::BacklogDrain;
pub use bounded_buffer::BoundedBuffer;
pub use dispatch_config::{DEFAULT_EMPTY_INTERVAL, DEFAULT_IDLE_INTERVAL, DispatchConfig};
pub use error::{CoreError, Result};
pub use presence_tracker::PresenceTracker;
pub use queue::BoundedBroadcastQueue;
pub use queue_stats::{QueueStats, QueueStatsSnapshot};
pub use subscription::Subscription;
pub use subscription_id::SubscriptionId;

#[cfg(test)]
mod tests;
