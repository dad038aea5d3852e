// Notification payload assembly
//
// The downstream channel renders Slack-style colored attachment blocks, so
// the envelope is `{"messages": [{"title": ..., "attachments": [...]}]}`.
// Exactly one message object is built per run. The shape is part of the
// operational contract; see the golden test at the bottom.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::describe_retention;

/// Subject line for the published notification.
pub const NOTIFICATION_SUBJECT: &str = "Log group retention compliance";

/// Title of the single message object inside the envelope.
pub const NOTIFICATION_TITLE: &str = "Log group retention policies updated";

const ATTACHMENT_COLOR: &str = "#d69e2e";

/// One remediated log group, captured during the scan phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationEntry {
    pub group_name: String,
    pub previous_retention_days: Option<i32>,
    pub new_retention_days: i32,
}

impl RemediationEntry {
    pub fn previous_retention_description(&self) -> String {
        describe_retention(self.previous_retention_days)
    }

    fn display_line(&self) -> String {
        format!(
            "{}: {} -> {} days",
            self.group_name,
            self.previous_retention_description(),
            self.new_retention_days
        )
    }
}

#[derive(Debug, Serialize)]
struct Attachment {
    color: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
struct Message {
    title: &'static str,
    attachments: Vec<Attachment>,
}

/// JSON envelope published once per run with at least one entry.
#[derive(Debug, Serialize)]
pub struct NotificationPayload {
    messages: Vec<Message>,
}

impl NotificationPayload {
    pub fn from_entries(entries: &[RemediationEntry]) -> Self {
        let attachments = entries
            .iter()
            .map(|entry| Attachment {
                color: ATTACHMENT_COLOR,
                text: entry.display_line(),
            })
            .collect();

        Self {
            messages: vec![Message {
                title: NOTIFICATION_TITLE,
                attachments,
            }],
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize notification payload")
    }
}
