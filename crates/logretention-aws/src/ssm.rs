// SSM Parameter Store adapter: GetParameter

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_ssm::Client;

use logretention_core::ParameterStore;

pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .send()
            .await
            .with_context(|| format!("GetParameter call failed for '{name}'"))?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("parameter '{name}' has no value"))
    }
}
