// logretention-core - retention compliance domain logic
//
// Owns the data model, the compliance scan, notification payload assembly,
// and the four-phase worker that drives one compliance run. External
// services (log group registry, parameter store, notification channel) are
// reached only through the traits in `collaborators`, so the whole run is
// testable with in-memory fakes.

pub mod collaborators;
pub mod error;
pub mod notification;
pub mod scan;
pub mod types;
pub mod worker;

pub use collaborators::{LogGroupPage, LogGroupRegistry, NotificationChannel, ParameterStore};
pub use error::WorkerError;
pub use notification::{NotificationPayload, RemediationEntry};
pub use types::{LogGroupDescriptor, RetentionPolicy};
pub use worker::{RetentionComplianceWorker, RunOptions, RunSummary};
