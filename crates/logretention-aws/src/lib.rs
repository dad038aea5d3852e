// logretention-aws - AWS SDK adapters for the core collaborator traits
//
// Credentials and region come from the SDK default chain (IAM role in
// Lambda, environment variables or the credentials file elsewhere).

mod logs;
mod sns;
mod ssm;

pub use logs::CloudWatchLogGroupRegistry;
pub use sns::SnsNotificationChannel;
pub use ssm::SsmParameterStore;
