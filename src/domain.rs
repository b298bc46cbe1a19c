// Domain layer modules
pub mod contact_submission;
pub mod intake_response;
pub mod submission_validator;

// Re-exports
pub use contact_submission::{
    RETENTION_DAYS, SUBMITTED_AT_FORMAT, SubmissionInput, SubmissionRecord, calculate_expires_at,
    format_submitted_at,
};
pub use intake_response::IntakeResponseBody;
pub use submission_validator::{SubmissionValidator, ValidationError, ValidationErrors};
