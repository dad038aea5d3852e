//! Error taxonomy for a compliance run
//!
//! Each variant maps to the phase that failed. The first failure aborts the
//! run; updates applied before a remediation failure stay applied.

use thiserror::Error;

/// Fatal failure of one compliance run.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// A log group listing page could not be fetched.
    #[error("log group enumeration failed: {0:#}")]
    Enumeration(anyhow::Error),

    /// The retention policy parameter could not be fetched or parsed.
    #[error("retention policy resolution failed for parameter '{parameter}': {cause:#}")]
    PolicyResolution {
        parameter: String,
        cause: anyhow::Error,
    },

    /// A retention update failed; earlier updates are not rolled back.
    #[error("retention update failed for log group '{group}': {cause:#}")]
    Remediation { group: String, cause: anyhow::Error },

    /// The summary notification could not be published; remediation has
    /// already happened at this point.
    #[error("notification publish failed for topic '{topic}': {cause:#}")]
    Notification { topic: String, cause: anyhow::Error },
}

impl WorkerError {
    pub fn policy_resolution(parameter: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::PolicyResolution {
            parameter: parameter.into(),
            cause,
        }
    }

    pub fn remediation(group: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::Remediation {
            group: group.into(),
            cause,
        }
    }

    pub fn notification(topic: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::Notification {
            topic: topic.into(),
            cause,
        }
    }
}
