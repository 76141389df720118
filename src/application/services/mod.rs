//! Application services
//!
//! Concrete service implementations that orchestrate the payments API.
//! Services depend on the `PaymentsApi` boundary trait but are themselves
//! concrete structs, not traits.

mod account;
mod funding_source;
mod sandbox;

pub use account::AccountService;
pub use funding_source::FundingSourceService;
pub use sandbox::SandboxService;
