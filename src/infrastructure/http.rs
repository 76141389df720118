//! HTTP implementation of the payments API (HAL+JSON over blocking reqwest)

use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Credentials;
use crate::domain::{
    Account, Balance, Collection, FundingSource, FundingSourceRequest, Links, MassPayment,
    MicroDepositRequest, MicroDeposits, Query, Transfer, ValidationFailure, Violation,
};
use crate::infrastructure::traits::PaymentsApi;
use crate::infrastructure::{ApiError, ApiResult, InfraError, InfraResult};

const HAL_JSON: &str = "application/vnd.dwolla.v1.hal+json";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(rename = "_links", default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(rename = "_embedded", default)]
    embedded: Option<ErrorEmbedded>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEmbedded {
    #[serde(default)]
    errors: Vec<Violation>,
}

/// Payments API client. One instance per run; the access token is requested
/// on first use and reused afterwards.
pub struct HttpPaymentsApi {
    http: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    token: Mutex<Option<String>>,
}

impl HttpPaymentsApi {
    pub fn new(credentials: &Credentials) -> InfraResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("dwolla-cli/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| InfraError::HttpClient { source })?;

        Ok(Self {
            http,
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
            api_secret: credentials.api_secret.clone(),
            token: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn token(&self) -> ApiResult<String> {
        let mut cached = self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let context = "POST /token".to_string();
        debug!("{}", context);
        let response = self
            .http
            .post(self.url("token"))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .map_err(|e| ApiError::transport(context.clone(), e))?;
        let token: TokenResponse = decode(check(response, &context)?, &context)?;

        *cached = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let token = self.token()?;
        let context = format!("{} {}", method, url);
        debug!("{} query={:?}", context, query);

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .header(ACCEPT, HeaderValue::from_static(HAL_JSON));

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))
                .json(body);
        }

        let response = request
            .send()
            .map_err(|e| ApiError::transport(context.clone(), e))?;
        check(response, &context)
    }

    fn get<T: DeserializeOwned>(&self, url: &str, query: &[(String, String)]) -> ApiResult<T> {
        let response = self.send(Method::GET, url, query, Option::<&Value>::None)?;
        decode(response, &format!("GET {url}"))
    }

    fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ApiResult<Response> {
        self.send(Method::POST, url, &[], Some(body))
    }

    /// POST, then fetch the resource named by the `Location` header.
    fn post_and_follow<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.post(url, body)?;
        let location =
            location(&response).ok_or_else(|| ApiError::MissingLocation(format!("POST {url}")))?;
        self.get(&location, &[])
    }

    fn funding_source_url(&self, id: &str, suffix: &str) -> String {
        self.url(&format!("funding-sources/{id}{suffix}"))
    }
}

impl PaymentsApi for HttpPaymentsApi {
    fn retrieve_account(&self) -> ApiResult<Account> {
        let root: Root = self.get(&self.url("/"), &[])?;
        let account = root
            .links
            .get("account")
            .ok_or_else(|| ApiError::MissingLink("account".into()))?;
        self.get(&account.href, &[])
    }

    fn list_mass_payments(
        &self,
        account: &Account,
        query: &Query,
    ) -> ApiResult<Collection<MassPayment>> {
        let url = self.url(&format!("accounts/{}/mass-payments", account.id));
        self.get(&url, query.pairs())
    }

    fn list_funding_sources(
        &self,
        account: &Account,
        removed: bool,
    ) -> ApiResult<Collection<FundingSource>> {
        let url = self.url(&format!("accounts/{}/funding-sources", account.id));
        self.get(&url, &[("removed".to_string(), removed.to_string())])
    }

    fn list_transfers(&self, account: &Account, query: &Query) -> ApiResult<Collection<Transfer>> {
        let url = self.url(&format!("accounts/{}/transfers", account.id));
        self.get(&url, query.pairs())
    }

    fn create_funding_source(
        &self,
        account: &Account,
        request: &FundingSourceRequest,
    ) -> ApiResult<FundingSource> {
        let url = self.url(&format!("accounts/{}/funding-sources", account.id));
        self.post_and_follow(&url, request)
    }

    fn retrieve_funding_source(&self, id: &str) -> ApiResult<FundingSource> {
        self.get(&self.funding_source_url(id, ""), &[])
    }

    fn update_funding_source(
        &self,
        id: &str,
        request: &FundingSourceRequest,
    ) -> ApiResult<FundingSource> {
        let url = self.funding_source_url(id, "");
        let response = self.post(&url, request)?;
        decode(response, &format!("POST {url}"))
    }

    fn remove_funding_source(&self, id: &str) -> ApiResult<()> {
        self.post(&self.funding_source_url(id, ""), &json!({ "removed": true }))?;
        Ok(())
    }

    fn retrieve_balance(&self, source: &FundingSource) -> ApiResult<Balance> {
        self.get(&self.funding_source_url(&source.id, "/balance"), &[])
    }

    fn initiate_micro_deposits(&self, source: &FundingSource) -> ApiResult<MicroDeposits> {
        let url = self.funding_source_url(&source.id, "/micro-deposits");
        let response = self.post(&url, &json!({}))?;
        match location(&response) {
            Some(location) => self.get(&location, &[]),
            None => decode(response, &format!("POST {url}")),
        }
    }

    fn retrieve_micro_deposits(&self, source: &FundingSource) -> ApiResult<MicroDeposits> {
        self.get(&self.funding_source_url(&source.id, "/micro-deposits"), &[])
    }

    fn verify_micro_deposits(
        &self,
        source: &FundingSource,
        request: &MicroDepositRequest,
    ) -> ApiResult<()> {
        self.post(&self.funding_source_url(&source.id, "/micro-deposits"), request)?;
        Ok(())
    }

    fn simulate_sandbox(&self) -> ApiResult<()> {
        self.post(&self.url("sandbox-simulations"), &json!({}))?;
        Ok(())
    }
}

fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Pass successful responses through; turn error responses into `ApiError`.
fn check(response: Response, context: &str) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response
        .text()
        .map_err(|e| ApiError::transport(format!("read error body of {context}"), e))?;
    Err(error_from_body(status, &text))
}

/// A body carrying `_embedded.errors` is a validation failure; anything else is generic.
fn error_from_body(status: StatusCode, text: &str) -> ApiError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    let violations = body.embedded.map(|e| e.errors).unwrap_or_default();

    if !violations.is_empty() {
        return ApiError::Validation(ValidationFailure {
            code: body.code,
            message: body.message,
            violations,
        });
    }

    let code = if body.code.is_empty() {
        status.canonical_reason().unwrap_or("Error").to_string()
    } else {
        body.code
    };
    let message = if !body.message.is_empty() {
        body.message
    } else if !text.trim().is_empty() {
        text.trim().to_string()
    } else {
        format!("HTTP {}", status.as_u16())
    };

    ApiError::Status {
        status: status.as_u16(),
        code,
        message,
    }
}

fn decode<T: DeserializeOwned>(response: Response, context: &str) -> ApiResult<T> {
    let text = response
        .text()
        .map_err(|e| ApiError::transport(format!("read body of {context}"), e))?;
    serde_json::from_str(&text).map_err(|source| ApiError::Decode {
        context: context.to_string(),
        source,
    })
}
