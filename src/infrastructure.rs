// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod submission_repository;

// Re-exports
pub use config::{DEFAULT_TABLE_NAME, IntakeConfig, TABLE_NAME_ENV, table_name_from_env};
pub use logging::init_logging;
pub use submission_repository::{DynamoSubmissionRepository, RepositoryError, SubmissionRepository};
