//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{AccountService, FundingSourceService, SandboxService};
use crate::config::Settings;
use crate::infrastructure::http::HttpPaymentsApi;
use crate::infrastructure::traits::PaymentsApi;
use crate::infrastructure::InfraResult;

/// Container holding all application services.
///
/// Built once per run; every service shares the same API client.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub accounts: AccountService,
    pub sources: FundingSourceService,
    pub sandbox: SandboxService,
}

impl ServiceContainer {
    /// Create a container backed by the HTTP client.
    ///
    /// Missing credentials fail here, before any network call.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let credentials = settings.credentials()?;
        debug!(
            "using {} environment at {}",
            settings.environment, credentials.base_url
        );
        let api = Arc::new(HttpPaymentsApi::new(&credentials)?);
        Ok(Self::with_api(settings, api))
    }

    /// Create a container with a custom API implementation (for testing).
    pub fn with_api(settings: Settings, api: Arc<dyn PaymentsApi>) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            accounts: AccountService::new(api.clone()),
            sources: FundingSourceService::new(api.clone()),
            sandbox: SandboxService::new(api),
        }
    }
}
