//! Error types for tasklist
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad script, incomplete submission)
//! - 4: Operation failed (io, serialization, terminal)

use thiserror::Error;

/// Exit codes for the tasklist CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Warning shown when a submission is missing a title or due date.
pub const INCOMPLETE_SUBMISSION: &str = "Please provide both task title and due date.";

/// Main error type for tasklist operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("{}", INCOMPLETE_SUBMISSION)]
    IncompleteSubmission,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Script error on line {line}: {message}")]
    ScriptSyntax { line: usize, message: String },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::IncompleteSubmission
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::ScriptSyntax { .. } => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for machine-readable output.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::ScriptSyntax { line, message } => Some(serde_json::json!({
                "line": line,
                "message": message,
            })),
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            _ => None,
        }
    }
}

/// Result type alias for tasklist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
