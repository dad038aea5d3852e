// Compliance scan - pure classification of enumerated log groups
//
// A group is non-compliant when its retention is unset ("No expiry") or
// exceeds the policy maximum. Output order matches enumeration order; log
// group names are unique, so no deduplication happens.

use tracing::info;

use crate::notification::RemediationEntry;
use crate::types::{LogGroupDescriptor, RetentionPolicy};

/// Result of scanning one enumeration snapshot against the policy.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Names of groups that need their retention updated, in enumeration order.
    pub non_compliant: Vec<String>,
    /// One notification entry per non-compliant group, same order.
    pub entries: Vec<RemediationEntry>,
}

pub fn scan_compliance(groups: &[LogGroupDescriptor], policy: RetentionPolicy) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for group in groups {
        if policy.permits(group.retention_days) {
            continue;
        }

        info!(
            group = %group.name,
            current = %group.retention_description(),
            new_days = policy.max_days(),
            "{} needs to have its retention policy updated. Current policy: {}. New policy: {} days.",
            group.name,
            group.retention_description(),
            policy.max_days()
        );

        outcome.non_compliant.push(group.name.clone());
        outcome.entries.push(RemediationEntry {
            group_name: group.name.clone(),
            previous_retention_days: group.retention_days,
            new_retention_days: policy.max_days(),
        });
    }

    outcome
}
