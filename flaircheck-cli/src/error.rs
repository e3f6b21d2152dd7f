//! CLI-specific error types and exit code mapping

use flaircheck_client::ClientError;
use flaircheck_core::error::FlairCheckError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The flair service did not answer the liveness probe.
    #[error("flair service not reachable: {0}")]
    Unreachable(String),

    /// The scenario ran to completion but some assertions failed.
    #[error("{failed} of {total} assertions failed")]
    AssertionsFailed { failed: usize, total: usize },

    /// The HTTP client could not be set up.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success, every assertion passed  |
    /// | 1    | General / command error          |
    /// | 2    | Configuration error              |
    /// | 3    | Flair service unreachable        |
    /// | 4    | One or more assertions failed    |
    /// | 10   | IO error                         |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Unreachable(_) => 3,
            Self::AssertionsFailed { .. } => 4,
            Self::Io(_) => 10,
            Self::Command(_) | Self::Client(_) | Self::JsonSerialize(_) => 1,
        }
    }
}

impl From<FlairCheckError> for CliError {
    fn from(e: FlairCheckError) -> Self {
        match e {
            FlairCheckError::Config(config) => Self::Config(config.to_string()),
            FlairCheckError::Io(io) => Self::Io(io),
        }
    }
}
