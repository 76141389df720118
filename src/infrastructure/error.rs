//! Infrastructure-level errors (API boundary and I/O concerns)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ValidationFailure;

/// Failures reported by the payments API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{code}: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    #[error("{}", .0.message)]
    Validation(ValidationFailure),

    #[error("decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response has no `{0}` link")]
    MissingLink(String),

    #[error("response to {0} has no Location header")]
    MissingLocation(String),
}

impl ApiError {
    pub fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }
}

/// Result type for calls across the payments API boundary.
pub type ApiResult<T> = Result<T, ApiError>;

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
