// logretention-config - process-wide configuration
//
// Built once at startup from environment variables and never mutated; the
// worker only ever sees the resulting struct, never the environment.
//
// Variables:
// - LOGRETENTION_MAX_RETENTION_PARAMETER  (required) SSM parameter name
// - LOGRETENTION_NOTIFICATION_TOPIC_ARN   (optional) absence disables publish
// - LOGRETENTION_PAGE_SIZE                (optional) listing page hint, 1..=50
// - AWS_REGION                            (optional, unprefixed) SDK region

use anyhow::{anyhow, bail, Context, Result};
use tracing::warn;

pub const ENV_PREFIX: &str = "LOGRETENTION_";

/// DescribeLogGroups rejects page hints above 50.
pub const MAX_PAGE_SIZE: i32 = 50;

const DEFAULT_PAGE_SIZE: i32 = 50;

/// Abstraction over environment-variable lookups so tests can supply their
/// own source instead of mutating the process environment.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the LOGRETENTION_ prefix.
    /// Used for AWS standard variables (AWS_REGION).
    fn get_raw(&self, key: &str) -> Option<String>;
}

struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Immutable worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Region override; when `None` the SDK default chain decides.
    pub region: Option<String>,
    /// Parameter store key holding the maximum retention in days.
    pub retention_parameter: String,
    /// Notification topic identifier; `None` disables publication.
    pub notification_topic: Option<String>,
    /// Page-size hint passed to every listing call.
    pub page_size: i32,
}

impl WorkerConfig {
    /// Load and validate configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_env(&StdEnvSource)
    }

    pub fn from_env<E: EnvSource>(env: &E) -> Result<Self> {
        let retention_parameter = env.get("MAX_RETENTION_PARAMETER").ok_or_else(|| {
            anyhow!("{ENV_PREFIX}MAX_RETENTION_PARAMETER must be set to an SSM parameter name")
        })?;

        let page_size = match env.get("PAGE_SIZE") {
            Some(value) => value
                .parse::<i32>()
                .with_context(|| format!("Failed to parse {ENV_PREFIX}PAGE_SIZE: {value:?}"))?,
            None => DEFAULT_PAGE_SIZE,
        };

        let config = Self {
            region: env.get_raw("AWS_REGION"),
            retention_parameter,
            notification_topic: env.get("NOTIFICATION_TOPIC_ARN"),
            page_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.retention_parameter.trim().is_empty() {
            bail!("retention parameter name must not be empty");
        }

        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            bail!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.page_size
            );
        }

        if self.notification_topic.is_none() {
            warn!("no notification topic configured; remediation summaries will not be published");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapEnvSource {
        prefixed: HashMap<&'static str, &'static str>,
        raw: HashMap<&'static str, &'static str>,
    }

    impl MapEnvSource {
        fn with(prefixed: &[(&'static str, &'static str)]) -> Self {
            Self {
                prefixed: prefixed.iter().copied().collect(),
                raw: HashMap::new(),
            }
        }
    }

    impl EnvSource for MapEnvSource {
        fn get(&self, key: &str) -> Option<String> {
            self.prefixed.get(key).map(|v| v.to_string())
        }

        fn get_raw(&self, key: &str) -> Option<String> {
            self.raw.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn loads_minimal_config_with_defaults() {
        let env = MapEnvSource::with(&[("MAX_RETENTION_PARAMETER", "/ops/max-log-retention")]);
        let config = WorkerConfig::from_env(&env).unwrap();

        assert_eq!(config.retention_parameter, "/ops/max-log-retention");
        assert_eq!(config.page_size, 50);
        assert!(config.notification_topic.is_none());
        assert!(config.region.is_none());
    }

    #[test]
    fn reads_topic_page_size_and_region() {
        let mut env = MapEnvSource::with(&[
            ("MAX_RETENTION_PARAMETER", "/ops/max-log-retention"),
            ("NOTIFICATION_TOPIC_ARN", "arn:aws:sns:us-east-1:1:ops"),
            ("PAGE_SIZE", "10"),
        ]);
        env.raw.insert("AWS_REGION", "eu-west-1");

        let config = WorkerConfig::from_env(&env).unwrap();
        assert_eq!(
            config.notification_topic.as_deref(),
            Some("arn:aws:sns:us-east-1:1:ops")
        );
        assert_eq!(config.page_size, 10);
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn missing_parameter_name_is_an_error() {
        let env = MapEnvSource::with(&[]);
        assert!(WorkerConfig::from_env(&env).is_err());
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        for bad in ["0", "51", "-3"] {
            let env = MapEnvSource::with(&[
                ("MAX_RETENTION_PARAMETER", "/ops/max-log-retention"),
                ("PAGE_SIZE", bad),
            ]);
            assert!(WorkerConfig::from_env(&env).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn rejects_unparseable_page_size() {
        let env = MapEnvSource::with(&[
            ("MAX_RETENTION_PARAMETER", "/ops/max-log-retention"),
            ("PAGE_SIZE", "many"),
        ]);
        assert!(WorkerConfig::from_env(&env).is_err());
    }
}
