// AWS Lambda runtime adapter
//
// Wires configuration and SDK clients once at cold start, then runs one
// compliance pass per trigger event (EventBridge schedule). Each invocation
// is independent; the only shared state is the immutable config and the
// SDK clients.
//
// Philosophy: Use lambda_runtime's provided tokio
// We don't add our own tokio - lambda_runtime provides it

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_lambda_events::cloudwatch_events::CloudWatchEvent;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use tracing::{error, info};

use logretention_aws::{CloudWatchLogGroupRegistry, SnsNotificationChannel, SsmParameterStore};
use logretention_config::WorkerConfig;
use logretention_core::{RetentionComplianceWorker, RunOptions};

struct LambdaState {
    config: WorkerConfig,
    registry: CloudWatchLogGroupRegistry,
    parameters: SsmParameterStore,
    notifier: SnsNotificationChannel,
}

/// Lambda runtime entry point
pub async fn run() -> Result<(), Error> {
    init_tracing();

    let config = WorkerConfig::load()?;
    info!(
        parameter = %config.retention_parameter,
        topic = config.notification_topic.as_deref().unwrap_or("<none>"),
        page_size = config.page_size,
        "retention compliance worker starting"
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    let sdk_config = loader.load().await;

    let state = Arc::new(LambdaState {
        registry: CloudWatchLogGroupRegistry::from_sdk_config(&sdk_config),
        parameters: SsmParameterStore::from_sdk_config(&sdk_config),
        notifier: SnsNotificationChannel::from_sdk_config(&sdk_config),
        config,
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<CloudWatchEvent>| {
        let state = state.clone();
        async move { handle_event(event, state).await }
    }))
    .await
}

/// Handler for one scheduled trigger; payload content is informational only.
async fn handle_event(
    event: LambdaEvent<CloudWatchEvent>,
    state: Arc<LambdaState>,
) -> Result<Value, Error> {
    let (trigger, context) = event.into_parts();
    info!(
        request_id = %context.request_id,
        source = trigger.source.as_deref().unwrap_or("unknown"),
        "retention compliance run triggered"
    );

    let worker = RetentionComplianceWorker::new(
        &state.registry,
        &state.parameters,
        &state.notifier,
        RunOptions {
            retention_parameter: state.config.retention_parameter.clone(),
            notification_topic: state.config.notification_topic.clone(),
            page_size: state.config.page_size,
        },
    );

    match worker.run().await {
        Ok(summary) => {
            info!(
                groups_seen = summary.groups_seen,
                groups_updated = summary.groups_updated,
                notification_published = summary.notification_published,
                "retention compliance run finished"
            );
            Ok(json!({
                "groupsSeen": summary.groups_seen,
                "nonCompliant": summary.non_compliant,
                "groupsUpdated": summary.groups_updated,
                "notificationPublished": summary.notification_published,
            }))
        }
        Err(err) => {
            error!(error = %err, "retention compliance run failed");
            Err(Error::from(err))
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        // The Lambda log stream already timestamps and colors poorly.
        .with_ansi(false)
        .without_time()
        .init();
}
