//! In-memory payments API for service and command tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dwolla_cli::config::Settings;
use dwolla_cli::domain::{
    Account, Amount, Balance, Collection, Currency, FundingSource, FundingSourceRequest,
    MassPayment, MicroDepositRequest, MicroDeposits, Query, Transfer, TransferStatus,
    ValidationFailure, Violation,
};
use dwolla_cli::infrastructure::di::ServiceContainer;
use dwolla_cli::infrastructure::traits::PaymentsApi;
use dwolla_cli::infrastructure::{ApiError, ApiResult};

/// Records every call; returns canned data or a queued failure per operation.
#[derive(Default)]
pub struct FakePaymentsApi {
    pub account: Account,
    pub funding_sources: Vec<FundingSource>,
    pub transfers: Collection<Transfer>,
    pub mass_payments: Collection<MassPayment>,
    pub balance: Balance,
    pub micro_deposits: MicroDeposits,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<Query>>,
    requests: Mutex<Vec<String>>,
}

impl FakePaymentsApi {
    pub fn new() -> Self {
        Self {
            account: Account {
                id: "acc-1".into(),
                name: "Jane Corp".into(),
                ..Default::default()
            },
            funding_sources: vec![funding_source("fs-1")],
            ..Default::default()
        }
    }

    /// Make the next call to `operation` fail with `err`.
    pub fn failing(self, operation: &'static str, err: ApiError) -> Self {
        self.failures.lock().unwrap().insert(operation, err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }

    /// JSON bodies sent with create/update/verify.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, detail: &str) -> ApiResult<()> {
        let call = if detail.is_empty() {
            operation.to_string()
        } else {
            format!("{operation} {detail}")
        };
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().remove(operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn body(&self, value: &impl serde::Serialize) {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_string(value).unwrap());
    }
}

impl PaymentsApi for FakePaymentsApi {
    fn retrieve_account(&self) -> ApiResult<Account> {
        self.record("retrieve_account", "")?;
        Ok(self.account.clone())
    }

    fn list_mass_payments(
        &self,
        account: &Account,
        query: &Query,
    ) -> ApiResult<Collection<MassPayment>> {
        self.record("list_mass_payments", &account.id)?;
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.mass_payments.clone())
    }

    fn list_funding_sources(
        &self,
        account: &Account,
        removed: bool,
    ) -> ApiResult<Collection<FundingSource>> {
        self.record("list_funding_sources", &format!("{} removed={removed}", account.id))?;
        let items = self
            .funding_sources
            .iter()
            .filter(|s| removed || !s.removed)
            .cloned()
            .collect();
        Ok(Collection::of(items, None))
    }

    fn list_transfers(&self, account: &Account, query: &Query) -> ApiResult<Collection<Transfer>> {
        self.record("list_transfers", &account.id)?;
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.transfers.clone())
    }

    fn create_funding_source(
        &self,
        account: &Account,
        request: &FundingSourceRequest,
    ) -> ApiResult<FundingSource> {
        self.record("create_funding_source", &account.id)?;
        self.body(request);
        Ok(FundingSource {
            id: "fs-new".into(),
            name: request.name.clone().unwrap_or_default(),
            bank_account_type: request.bank_account_type,
            ..Default::default()
        })
    }

    fn retrieve_funding_source(&self, id: &str) -> ApiResult<FundingSource> {
        self.record("retrieve_funding_source", id)?;
        self.funding_sources
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    fn update_funding_source(
        &self,
        id: &str,
        request: &FundingSourceRequest,
    ) -> ApiResult<FundingSource> {
        self.record("update_funding_source", id)?;
        self.body(request);
        let mut source = funding_source(id);
        if let Some(name) = &request.name {
            source.name = name.clone();
        }
        Ok(source)
    }

    fn remove_funding_source(&self, id: &str) -> ApiResult<()> {
        self.record("remove_funding_source", id)
    }

    fn retrieve_balance(&self, source: &FundingSource) -> ApiResult<Balance> {
        self.record("retrieve_balance", &source.id)?;
        Ok(self.balance.clone())
    }

    fn initiate_micro_deposits(&self, source: &FundingSource) -> ApiResult<MicroDeposits> {
        self.record("initiate_micro_deposits", &source.id)?;
        Ok(self.micro_deposits.clone())
    }

    fn retrieve_micro_deposits(&self, source: &FundingSource) -> ApiResult<MicroDeposits> {
        self.record("retrieve_micro_deposits", &source.id)?;
        Ok(self.micro_deposits.clone())
    }

    fn verify_micro_deposits(
        &self,
        source: &FundingSource,
        request: &MicroDepositRequest,
    ) -> ApiResult<()> {
        self.record("verify_micro_deposits", &source.id)?;
        self.body(request);
        Ok(())
    }

    fn simulate_sandbox(&self) -> ApiResult<()> {
        self.record("simulate_sandbox", "")
    }
}

pub fn funding_source(id: &str) -> FundingSource {
    FundingSource {
        id: id.into(),
        name: "Payroll".into(),
        created: "2024-01-02T03:04:05.000Z".into(),
        ..Default::default()
    }
}

pub fn transfer(id: &str, status: TransferStatus) -> Transfer {
    Transfer {
        id: id.into(),
        status,
        amount: Amount::new("10.00", Currency::Usd),
        created: "2024-01-02T03:04:05.000Z".into(),
        ..Default::default()
    }
}

pub fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        code: "NotFound".into(),
        message: "The requested resource was not found.".into(),
    }
}

pub fn validation_error(path: &str, message: &str) -> ApiError {
    ApiError::Validation(ValidationFailure {
        code: "ValidationError".into(),
        message: "Validation error(s) present. See embedded errors list for more details.".into(),
        violations: vec![Violation {
            code: "Invalid".into(),
            message: message.into(),
            path: path.into(),
        }],
    })
}

/// Container around `api` with sandbox settings and dummy credentials.
pub fn container(api: Arc<FakePaymentsApi>) -> ServiceContainer {
    let settings = Settings {
        api_key: Some("key".into()),
        api_secret: Some("secret".into()),
        ..Default::default()
    };
    ServiceContainer::with_api(settings, api)
}
