// SNS adapter: Publish

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_sns::Client;
use tracing::debug;

use logretention_core::NotificationChannel;

pub struct SnsNotificationChannel {
    client: Client,
}

impl SnsNotificationChannel {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl NotificationChannel for SnsNotificationChannel {
    async fn publish(&self, topic: &str, subject: &str, json_body: &str) -> Result<()> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .subject(subject)
            .message(json_body)
            .send()
            .await
            .with_context(|| format!("Publish call failed for topic '{topic}'"))?;

        debug!(message_id = ?output.message_id(), "notification accepted by SNS");
        Ok(())
    }
}
