//! Application-level errors (wraps domain and API boundary errors)

use thiserror::Error;

use crate::domain::{DomainError, ValidationFailure};
use crate::infrastructure::ApiError;

/// Application errors wrap domain errors and add configuration context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("API {name} is required; set `api_{name}` in the config file, {env} or --{flag}")]
    MissingCredential {
        name: &'static str,
        env: &'static str,
        flag: &'static str,
    },
}

impl ApplicationError {
    /// Embedded violation list, if this error carries one.
    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            ApplicationError::Api(ApiError::Validation(failure)) => Some(failure),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
