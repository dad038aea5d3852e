// End-to-end compliance runs over in-memory collaborators.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use logretention_core::{
    LogGroupDescriptor, LogGroupPage, LogGroupRegistry, NotificationChannel, ParameterStore,
    RetentionComplianceWorker, RunOptions,
};

/// Registry whose retention state is actually mutated, so repeated runs
/// observe the effect of earlier remediation.
struct InMemoryRegistry {
    groups: Mutex<Vec<LogGroupDescriptor>>,
    retention_calls: Mutex<Vec<(String, i32)>>,
}

impl InMemoryRegistry {
    fn new(groups: Vec<LogGroupDescriptor>) -> Self {
        Self {
            groups: Mutex::new(groups),
            retention_calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LogGroupRegistry for InMemoryRegistry {
    async fn list_page(&self, page_size: i32, cursor: Option<&str>) -> Result<LogGroupPage> {
        let groups = self.groups.lock().unwrap();
        let start = cursor.map_or(0, |token| token.parse::<usize>().unwrap());
        let end = (start + page_size as usize).min(groups.len());
        Ok(LogGroupPage {
            groups: groups[start..end].to_vec(),
            next_cursor: (end < groups.len()).then(|| end.to_string()),
        })
    }

    async fn set_retention(&self, group_name: &str, days: i32) -> Result<()> {
        let mut groups = self.groups.lock().unwrap();
        let group = groups
            .iter_mut()
            .find(|group| group.name == group_name)
            .unwrap();
        group.retention_days = Some(days);
        self.retention_calls
            .lock()
            .unwrap()
            .push((group_name.to_string(), days));
        Ok(())
    }
}

struct FixedParameter(&'static str);

#[async_trait]
impl ParameterStore for FixedParameter {
    async fn get_parameter(&self, _name: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    bodies: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationChannel for RecordingNotifier {
    async fn publish(&self, _topic: &str, _subject: &str, json_body: &str) -> Result<()> {
        self.bodies.lock().unwrap().push(json_body.to_string());
        Ok(())
    }
}

fn options() -> RunOptions {
    RunOptions {
        retention_parameter: "/ops/max-log-retention".to_string(),
        notification_topic: Some("arn:aws:sns:us-east-1:123456789012:ops".to_string()),
        page_size: 2,
    }
}

#[tokio::test]
async fn example_scenario_two_of_three_groups_remediated() {
    // policy = 3; groups = [{A,5},{B,none},{C,2}] -> A and B updated, C untouched
    let registry = InMemoryRegistry::new(vec![
        LogGroupDescriptor::new("A", Some(5)),
        LogGroupDescriptor::new("B", None),
        LogGroupDescriptor::new("C", Some(2)),
    ]);
    let parameters = FixedParameter("3");
    let notifier = RecordingNotifier::default();

    let worker = RetentionComplianceWorker::new(&registry, &parameters, &notifier, options());
    let summary = worker.run().await.unwrap();

    assert_eq!(summary.groups_seen, 3);
    assert_eq!(summary.non_compliant, 2);
    assert_eq!(summary.groups_updated, 2);
    assert!(summary.notification_published);

    assert_eq!(
        *registry.retention_calls.lock().unwrap(),
        vec![("A".to_string(), 3), ("B".to_string(), 3)]
    );
    let groups = registry.groups.lock().unwrap();
    assert_eq!(groups[2].retention_days, Some(2));

    let bodies = notifier.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].contains("A: 5 days -> 3 days"));
    assert!(bodies[0].contains("B: No expiry -> 3 days"));
}

#[tokio::test]
async fn example_scenario_compliant_account_is_a_no_op() {
    // policy = 3; groups = [{A,3}] -> nothing happens
    let registry = InMemoryRegistry::new(vec![LogGroupDescriptor::new("A", Some(3))]);
    let parameters = FixedParameter("3");
    let notifier = RecordingNotifier::default();

    let worker = RetentionComplianceWorker::new(&registry, &parameters, &notifier, options());
    let summary = worker.run().await.unwrap();

    assert_eq!(summary.groups_seen, 1);
    assert_eq!(summary.groups_updated, 0);
    assert!(registry.retention_calls.lock().unwrap().is_empty());
    assert!(notifier.bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn second_run_after_remediation_is_a_no_op() {
    let registry = InMemoryRegistry::new(vec![
        LogGroupDescriptor::new("A", Some(30)),
        LogGroupDescriptor::new("B", None),
    ]);
    let parameters = FixedParameter("3");
    let notifier = RecordingNotifier::default();

    let first = RetentionComplianceWorker::new(&registry, &parameters, &notifier, options())
        .run()
        .await
        .unwrap();
    assert_eq!(first.groups_updated, 2);

    let second = RetentionComplianceWorker::new(&registry, &parameters, &notifier, options())
        .run()
        .await
        .unwrap();
    assert_eq!(second.groups_updated, 0);
    assert!(!second.notification_published);

    // No retention calls and no notification beyond the first run's.
    assert_eq!(registry.retention_calls.lock().unwrap().len(), 2);
    assert_eq!(notifier.bodies.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn pagination_walks_every_page_with_small_hint() {
    let groups: Vec<_> = (0..7)
        .map(|i| LogGroupDescriptor::new(format!("group-{i}"), None))
        .collect();
    let registry = InMemoryRegistry::new(groups);
    let parameters = FixedParameter("3");
    let notifier = RecordingNotifier::default();

    let worker = RetentionComplianceWorker::new(&registry, &parameters, &notifier, options());
    let summary = worker.run().await.unwrap();

    assert_eq!(summary.groups_seen, 7);
    assert_eq!(summary.groups_updated, 7);
    let calls = registry.retention_calls.lock().unwrap();
    assert_eq!(calls.first().unwrap().0, "group-0");
    assert_eq!(calls.last().unwrap().0, "group-6");
}
