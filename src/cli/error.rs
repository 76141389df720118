//! CLI-level errors (wraps infrastructure and application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ValidationFailure;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Application(_) | CliError::Infra(_) => {
                crate::exitcode::FAILURE
            }
        }
    }

    /// Violation list carried anywhere in the error chain.
    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            CliError::Application(e) | CliError::Infra(InfraError::Application(e)) => {
                e.validation_failure()
            }
            _ => None,
        }
    }
}

impl From<crate::domain::DomainError> for CliError {
    fn from(e: crate::domain::DomainError) -> Self {
        CliError::Application(e.into())
    }
}

impl From<crate::infrastructure::ApiError> for CliError {
    fn from(e: crate::infrastructure::ApiError) -> Self {
        CliError::Application(e.into())
    }
}

/// Failures writing command output.
impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Infra(InfraError::io("write output", e))
    }
}
