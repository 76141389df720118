//! Sandbox-only operations

use std::sync::Arc;

use tracing::instrument;

use crate::application::ApplicationResult;
use crate::infrastructure::traits::PaymentsApi;

pub struct SandboxService {
    api: Arc<dyn PaymentsApi>,
}

impl SandboxService {
    pub fn new(api: Arc<dyn PaymentsApi>) -> Self {
        Self { api }
    }

    /// Process pending sandbox transfers.
    #[instrument(level = "debug", skip(self))]
    pub fn simulate(&self) -> ApplicationResult<()> {
        Ok(self.api.simulate_sandbox()?)
    }
}
