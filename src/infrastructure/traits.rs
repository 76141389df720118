//! Payments API boundary trait
//!
//! Services talk to the remote API only through this trait, allowing them
//! to be tested with in-memory implementations.

use crate::domain::{
    Account, Balance, Collection, FundingSource, FundingSourceRequest, MassPayment,
    MicroDepositRequest, MicroDeposits, Query, Transfer,
};
use crate::infrastructure::ApiResult;

/// Resource operations offered by the payments API.
pub trait PaymentsApi: Send + Sync {
    /// Retrieve the account the credentials belong to.
    fn retrieve_account(&self) -> ApiResult<Account>;

    fn list_mass_payments(
        &self,
        account: &Account,
        query: &Query,
    ) -> ApiResult<Collection<MassPayment>>;

    /// List funding sources; `removed` includes removed ones.
    fn list_funding_sources(
        &self,
        account: &Account,
        removed: bool,
    ) -> ApiResult<Collection<FundingSource>>;

    fn list_transfers(&self, account: &Account, query: &Query) -> ApiResult<Collection<Transfer>>;

    fn create_funding_source(
        &self,
        account: &Account,
        request: &FundingSourceRequest,
    ) -> ApiResult<FundingSource>;

    fn retrieve_funding_source(&self, id: &str) -> ApiResult<FundingSource>;

    fn update_funding_source(
        &self,
        id: &str,
        request: &FundingSourceRequest,
    ) -> ApiResult<FundingSource>;

    fn remove_funding_source(&self, id: &str) -> ApiResult<()>;

    fn retrieve_balance(&self, source: &FundingSource) -> ApiResult<Balance>;

    fn initiate_micro_deposits(&self, source: &FundingSource) -> ApiResult<MicroDeposits>;

    fn retrieve_micro_deposits(&self, source: &FundingSource) -> ApiResult<MicroDeposits>;

    fn verify_micro_deposits(
        &self,
        source: &FundingSource,
        request: &MicroDepositRequest,
    ) -> ApiResult<()>;

    /// Process pending sandbox transfers (sandbox environment only).
    fn simulate_sandbox(&self) -> ApiResult<()>;
}
