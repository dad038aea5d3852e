// Domain types for one compliance run
//
// A run works on an immutable snapshot of log group descriptors plus a
// single policy value resolved once up front; nothing here outlives the
// invocation.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Snapshot of one CloudWatch log group as returned by enumeration.
///
/// `retention_days` of `None` means no expiry is configured, which is
/// always non-compliant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogGroupDescriptor {
    pub name: String,
    pub retention_days: Option<i32>,
}

impl LogGroupDescriptor {
    pub fn new(name: impl Into<String>, retention_days: Option<i32>) -> Self {
        Self {
            name: name.into(),
            retention_days,
        }
    }

    /// Human-readable retention description used in logs and notifications.
    pub fn retention_description(&self) -> String {
        describe_retention(self.retention_days)
    }
}

pub(crate) fn describe_retention(retention_days: Option<i32>) -> String {
    match retention_days {
        Some(days) => format!("{} days", days),
        None => "No expiry".to_string(),
    }
}

/// Maximum permitted retention in days, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    max_days: i32,
}

impl RetentionPolicy {
    pub fn new(max_days: i32) -> Result<Self> {
        if max_days <= 0 {
            bail!("retention policy must be a positive number of days, got {max_days}");
        }
        Ok(Self { max_days })
    }

    /// Normalize the parameter store's text value to a number.
    ///
    /// The store hands back the value as a string; comparing it as text is
    /// a latent defect, so a value that does not parse to a positive
    /// integer fails policy resolution outright.
    pub fn from_parameter_text(text: &str) -> Result<Self> {
        let max_days = text
            .trim()
            .parse::<i32>()
            .with_context(|| format!("retention policy value {text:?} is not an integer"))?;
        Self::new(max_days)
    }

    pub fn max_days(&self) -> i32 {
        self.max_days
    }

    /// Compliance rule: retention must be set and must not exceed the policy.
    pub fn permits(&self, retention_days: Option<i32>) -> bool {
        matches!(retention_days, Some(days) if days <= self.max_days)
    }
}
