// Contracts for the three external services a run talks to
//
// Implementations:
// - CloudWatchLogGroupRegistry / SsmParameterStore / SnsNotificationChannel
//   (logretention-aws)
// - in-memory fakes (tests)

use anyhow::Result;
use async_trait::async_trait;

use crate::types::LogGroupDescriptor;

/// One page of a cursor-paginated log group listing.
#[derive(Debug, Clone, Default)]
pub struct LogGroupPage {
    pub groups: Vec<LogGroupDescriptor>,
    /// Opaque continuation cursor; `None` means this was the last page.
    pub next_cursor: Option<String>,
}

/// Log group listing and retention updates.
#[async_trait]
pub trait LogGroupRegistry: Send + Sync {
    /// Fetch one page of log groups. `page_size` is a hint, not a guarantee.
    async fn list_page(&self, page_size: i32, cursor: Option<&str>) -> Result<LogGroupPage>;

    /// Set the retention policy of a single log group, in days.
    async fn set_retention(&self, group_name: &str, days: i32) -> Result<()>;
}

/// Read access to the central parameter store.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch a parameter's value as text; the caller normalizes it.
    async fn get_parameter(&self, name: &str) -> Result<String>;
}

/// Outbound notification publishing.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn publish(&self, topic: &str, subject: &str, json_body: &str) -> Result<()>;
}
