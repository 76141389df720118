//! Infrastructure layer: payments API client and DI container
//!
//! This layer implements the payments API boundary trait and wires up services.

pub mod di;
pub mod error;
pub mod http;
pub mod traits;

pub use error::{ApiError, ApiResult, InfraError, InfraResult};
