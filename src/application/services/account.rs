//! Account-scoped operations
//!
//! Every listing resolves the authorized account first; list endpoints hang
//! off the account resource.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    Account, Collection, FundingSource, FundingSourceRequest, MassPayment, PageFilters, Transfer,
    TransferFilters,
};
use crate::infrastructure::traits::PaymentsApi;

/// Account service.
pub struct AccountService {
    api: Arc<dyn PaymentsApi>,
}

impl AccountService {
    pub fn new(api: Arc<dyn PaymentsApi>) -> Self {
        Self { api }
    }

    /// The account the configured credentials belong to.
    #[instrument(level = "debug", skip(self))]
    pub fn retrieve(&self) -> ApplicationResult<Account> {
        let account = self.api.retrieve_account()?;
        debug!("account: {}", account.id);
        Ok(account)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list_transfers(&self, filters: &TransferFilters) -> ApplicationResult<Collection<Transfer>> {
        let account = self.retrieve()?;
        let query = filters.to_filter_set().build();
        debug!("transfer query: {:?}", query.pairs());
        Ok(self.api.list_transfers(&account, &query)?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list_mass_payments(
        &self,
        filters: &PageFilters,
    ) -> ApplicationResult<Collection<MassPayment>> {
        let account = self.retrieve()?;
        let query = filters.to_filter_set().build();
        debug!("mass payment query: {:?}", query.pairs());
        Ok(self.api.list_mass_payments(&account, &query)?)
    }

    /// `removed` includes funding sources that were removed.
    #[instrument(level = "debug", skip(self))]
    pub fn list_funding_sources(&self, removed: bool) -> ApplicationResult<Collection<FundingSource>> {
        let account = self.retrieve()?;
        Ok(self.api.list_funding_sources(&account, removed)?)
    }

    #[instrument(level = "debug", skip(self, request))]
    pub fn create_funding_source(
        &self,
        request: &FundingSourceRequest,
    ) -> ApplicationResult<FundingSource> {
        let account = self.retrieve()?;
        let source = self.api.create_funding_source(&account, request)?;
        debug!("created funding source {}", source.id);
        Ok(source)
    }
}
