// RetentionComplianceWorker - one compliance run, four phases in order
//
// 1. Enumerate all log groups (cursor pagination, fail-fast).
// 2. Resolve the maximum retention from the parameter store.
// 3. Scan for non-compliant groups.
// 4. Remediate sequentially, then publish one summary notification.
//
// The run is stateless and idempotent: re-running against unchanged inputs
// applies the same (possibly empty) set of updates. A remediation failure
// aborts the remaining loop without rolling back earlier updates.

use tracing::{debug, info};

use crate::collaborators::{LogGroupRegistry, NotificationChannel, ParameterStore};
use crate::error::WorkerError;
use crate::notification::{NotificationPayload, RemediationEntry, NOTIFICATION_SUBJECT};
use crate::scan::scan_compliance;
use crate::types::{LogGroupDescriptor, RetentionPolicy};

/// Per-run settings, taken from the process-wide configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Parameter store key holding the maximum retention in days.
    pub retention_parameter: String,
    /// Notification topic; `None` disables publication entirely.
    pub notification_topic: Option<String>,
    /// Page-size hint for the listing calls. Tuning knob, not correctness.
    pub page_size: i32,
}

/// What one run saw and did; returned to the caller for visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub groups_seen: usize,
    pub non_compliant: usize,
    pub groups_updated: usize,
    pub notification_published: bool,
}

pub struct RetentionComplianceWorker<'a> {
    registry: &'a dyn LogGroupRegistry,
    parameters: &'a dyn ParameterStore,
    notifier: &'a dyn NotificationChannel,
    options: RunOptions,
}

impl<'a> RetentionComplianceWorker<'a> {
    pub fn new(
        registry: &'a dyn LogGroupRegistry,
        parameters: &'a dyn ParameterStore,
        notifier: &'a dyn NotificationChannel,
        options: RunOptions,
    ) -> Self {
        Self {
            registry,
            parameters,
            notifier,
            options,
        }
    }

    pub async fn run(&self) -> Result<RunSummary, WorkerError> {
        let groups = self.enumerate_log_groups().await?;
        if groups.is_empty() {
            info!("Unable to find any log groups.");
            return Ok(RunSummary::default());
        }

        let policy = self.resolve_policy().await?;
        info!(
            groups = groups.len(),
            max_days = policy.max_days(),
            "scanning log groups against retention policy"
        );

        let outcome = scan_compliance(&groups, policy);
        if outcome.non_compliant.is_empty() {
            info!("No log groups that require updating.");
            return Ok(RunSummary {
                groups_seen: groups.len(),
                ..RunSummary::default()
            });
        }

        self.remediate(&outcome.non_compliant, policy).await?;
        let notification_published = self.notify(&outcome.entries).await?;

        Ok(RunSummary {
            groups_seen: groups.len(),
            non_compliant: outcome.non_compliant.len(),
            groups_updated: outcome.non_compliant.len(),
            notification_published,
        })
    }

    /// Phase 1: concatenate all pages, preserving provider order.
    async fn enumerate_log_groups(&self) -> Result<Vec<LogGroupDescriptor>, WorkerError> {
        let mut groups = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .registry
                .list_page(self.options.page_size, cursor.as_deref())
                .await
                .map_err(WorkerError::Enumeration)?;

            debug!(page_groups = page.groups.len(), "fetched log group page");
            groups.extend(page.groups);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(groups)
    }

    /// Phase 2: fetch the policy value and normalize it to a number.
    async fn resolve_policy(&self) -> Result<RetentionPolicy, WorkerError> {
        let parameter = &self.options.retention_parameter;
        let text = self
            .parameters
            .get_parameter(parameter)
            .await
            .map_err(|cause| WorkerError::policy_resolution(parameter, cause))?;

        RetentionPolicy::from_parameter_text(&text)
            .map_err(|cause| WorkerError::policy_resolution(parameter, cause))
    }

    /// Phase 4a: apply the policy to each non-compliant group, one at a time.
    async fn remediate(
        &self,
        group_names: &[String],
        policy: RetentionPolicy,
    ) -> Result<(), WorkerError> {
        for name in group_names {
            self.registry
                .set_retention(name, policy.max_days())
                .await
                .map_err(|cause| WorkerError::remediation(name, cause))?;
            info!(group = %name, days = policy.max_days(), "{} updated.", name);
        }
        Ok(())
    }

    /// Phase 4b: publish one summary notification.
    ///
    /// No configured topic and an empty entry list are both silent
    /// successes, not errors. Returns whether a publish happened.
    async fn notify(&self, entries: &[RemediationEntry]) -> Result<bool, WorkerError> {
        let Some(topic) = self.options.notification_topic.as_deref() else {
            debug!("no notification topic configured; skipping publish");
            return Ok(false);
        };
        if entries.is_empty() {
            return Ok(false);
        }

        let body = NotificationPayload::from_entries(entries)
            .to_json()
            .map_err(|cause| WorkerError::notification(topic, cause))?;

        self.notifier
            .publish(topic, NOTIFICATION_SUBJECT, &body)
            .await
            .map_err(|cause| WorkerError::notification(topic, cause))?;

        info!(topic = %topic, entries = entries.len(), "remediation notification published");
        Ok(true)
    }
}
