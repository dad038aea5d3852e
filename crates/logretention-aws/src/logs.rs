// CloudWatch Logs adapter: DescribeLogGroups + PutRetentionPolicy

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::types::LogGroup;
use aws_sdk_cloudwatchlogs::Client;
use tracing::debug;

use logretention_core::{LogGroupDescriptor, LogGroupPage, LogGroupRegistry};

pub struct CloudWatchLogGroupRegistry {
    client: Client,
}

impl CloudWatchLogGroupRegistry {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl LogGroupRegistry for CloudWatchLogGroupRegistry {
    async fn list_page(&self, page_size: i32, cursor: Option<&str>) -> Result<LogGroupPage> {
        let output = self
            .client
            .describe_log_groups()
            .limit(page_size)
            .set_next_token(cursor.map(str::to_string))
            .send()
            .await
            .context("DescribeLogGroups call failed")?;

        let groups = output
            .log_groups()
            .iter()
            .filter_map(descriptor_from_sdk)
            .collect::<Vec<_>>();
        debug!(groups = groups.len(), "DescribeLogGroups page received");

        Ok(LogGroupPage {
            groups,
            next_cursor: output.next_token().map(str::to_string),
        })
    }

    async fn set_retention(&self, group_name: &str, days: i32) -> Result<()> {
        self.client
            .put_retention_policy()
            .log_group_name(group_name)
            .retention_in_days(days)
            .send()
            .await
            .with_context(|| format!("PutRetentionPolicy call failed for '{group_name}'"))?;
        Ok(())
    }
}

/// Groups without a name are malformed API output and are skipped.
fn descriptor_from_sdk(group: &LogGroup) -> Option<LogGroupDescriptor> {
    let name = group.log_group_name()?;
    Some(LogGroupDescriptor::new(name, group.retention_in_days()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_sdk_log_group_fields() {
        let group = LogGroup::builder()
            .log_group_name("/aws/lambda/api")
            .retention_in_days(14)
            .build();
        let descriptor = descriptor_from_sdk(&group).unwrap();
        assert_eq!(descriptor.name, "/aws/lambda/api");
        assert_eq!(descriptor.retention_days, Some(14));
    }

    #[test]
    fn absent_retention_maps_to_none() {
        let group = LogGroup::builder().log_group_name("/aws/lambda/api").build();
        let descriptor = descriptor_from_sdk(&group).unwrap();
        assert_eq!(descriptor.retention_days, None);
    }

    #[test]
    fn nameless_group_is_skipped() {
        let group = LogGroup::builder().retention_in_days(7).build();
        assert!(descriptor_from_sdk(&group).is_none());
    }
}
