//! Funding source operations
//!
//! Follow-up calls (balance, micro-deposits, update) retrieve the funding
//! source first, so an unknown id fails before the second request.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    Amount, Balance, Currency, FundingSource, FundingSourceRequest, MicroDepositRequest,
    MicroDeposits,
};
use crate::infrastructure::traits::PaymentsApi;

/// Funding source service.
pub struct FundingSourceService {
    api: Arc<dyn PaymentsApi>,
}

impl FundingSourceService {
    pub fn new(api: Arc<dyn PaymentsApi>) -> Self {
        Self { api }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn retrieve(&self, id: &str) -> ApplicationResult<FundingSource> {
        Ok(self.api.retrieve_funding_source(id)?)
    }

    /// Send only the fields present in `request`.
    #[instrument(level = "debug", skip(self, request))]
    pub fn update(&self, id: &str, request: &FundingSourceRequest) -> ApplicationResult<FundingSource> {
        let source = self.retrieve(id)?;
        debug!("updating funding source {}", source.id);
        Ok(self.api.update_funding_source(&source.id, request)?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove(&self, id: &str) -> ApplicationResult<()> {
        Ok(self.api.remove_funding_source(id)?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn balance(&self, id: &str) -> ApplicationResult<Balance> {
        let source = self.retrieve(id)?;
        Ok(self.api.retrieve_balance(&source)?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn initiate_micro_deposits(&self, id: &str) -> ApplicationResult<MicroDeposits> {
        let source = self.retrieve(id)?;
        Ok(self.api.initiate_micro_deposits(&source)?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn retrieve_micro_deposits(&self, id: &str) -> ApplicationResult<MicroDeposits> {
        let source = self.retrieve(id)?;
        Ok(self.api.retrieve_micro_deposits(&source)?)
    }

    /// Verify ownership with the two deposited amounts.
    ///
    /// The currency is validated before any request is made.
    #[instrument(level = "debug", skip(self))]
    pub fn verify_micro_deposits(
        &self,
        id: &str,
        amount1: &str,
        amount2: &str,
        currency: &str,
    ) -> ApplicationResult<()> {
        let currency: Currency = currency.parse()?;
        let request = MicroDepositRequest {
            amount1: Amount::new(amount1, currency),
            amount2: Amount::new(amount2, currency),
        };
        let source = self.retrieve(id)?;
        Ok(self.api.verify_micro_deposits(&source, &request)?)
    }
}
