//! Domain entities: payments API resources and request payloads

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// HAL link relation, e.g. `_links.account.href`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(
        rename = "resource-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_type: Option<String>,
}

/// Transport metadata carried by every resource (`_links`).
pub type Links = BTreeMap<String, Link>;

/// Generates `as_str()` and `Display` for enums whose text is their wire name.
macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Symbolic name as used on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingSourceStatus {
    Unverified,
    Verified,
    #[default]
    #[serde(other)]
    Unknown,
}

wire_names!(FundingSourceStatus {
    Unverified => "unverified",
    Verified => "verified",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingSourceType {
    Bank,
    Balance,
    #[default]
    #[serde(other)]
    Unknown,
}

wire_names!(FundingSourceType {
    Bank => "bank",
    Balance => "balance",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BankAccountType {
    Checking,
    Savings,
    GeneralLedger,
    Loan,
    #[default]
    #[serde(other)]
    Unknown,
}

wire_names!(BankAccountType {
    Checking => "checking",
    Savings => "savings",
    GeneralLedger => "general-ledger",
    Loan => "loan",
    Unknown => "unknown",
});

/// Only personal bank account types can be set from the command line.
impl FromStr for BankAccountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checking" => Ok(BankAccountType::Checking),
            "savings" => Ok(BankAccountType::Savings),
            other => Err(DomainError::InvalidBankAccountType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Processed,
    Failed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

wire_names!(TransferStatus {
    Pending => "pending",
    Processed => "processed",
    Failed => "failed",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassPaymentStatus {
    Deferred,
    Pending,
    Processing,
    Complete,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

wire_names!(MassPaymentStatus {
    Deferred => "deferred",
    Pending => "pending",
    Processing => "processing",
    Complete => "complete",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicroDepositStatus {
    Pending,
    Processed,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

wire_names!(MicroDepositStatus {
    Pending => "pending",
    Processed => "processed",
    Failed => "failed",
    Unknown => "unknown",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
}

wire_names!(Currency { Usd => "USD" });

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            other => Err(DomainError::InvalidCurrency(other.to_string())),
        }
    }
}

/// Money as the API sends it: decimal text plus currency code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: String,
}

impl Amount {
    pub fn new(value: impl Into<String>, currency: Currency) -> Self {
        Self {
            value: value.into(),
            currency: currency.as_str().to_string(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// The master account the API credentials belong to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_links", default)]
    pub links: Links,
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub timezone_offset: Option<f64>,
}

/// A bank account or balance registered against an account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSource {
    #[serde(rename = "_links", default)]
    pub links: Links,
    pub id: String,
    #[serde(default)]
    pub status: FundingSourceStatus,
    #[serde(rename = "type", default)]
    pub source_type: FundingSourceType,
    #[serde(default)]
    pub bank_account_type: Option<BankAccountType>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub created: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(rename = "_links", default)]
    pub links: Links,
    #[serde(default)]
    pub balance: Option<Amount>,
    #[serde(default)]
    pub total: Option<Amount>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MicroDepositFailure {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl fmt::Display for MicroDepositFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MicroDeposits {
    #[serde(rename = "_links", default)]
    pub links: Links,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub status: MicroDepositStatus,
    #[serde(default)]
    pub failure: Option<MicroDepositFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Clearing {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl fmt::Display for Clearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [("source", &self.source), ("destination", &self.destination)]
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(rename = "_links", default)]
    pub links: Links,
    pub id: String,
    #[serde(default)]
    pub status: TransferStatus,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub clearing: Option<Clearing>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassPayment {
    #[serde(rename = "_links", default)]
    pub links: Links,
    pub id: String,
    #[serde(default)]
    pub status: MassPaymentStatus,
    #[serde(default)]
    pub total: Option<Amount>,
    #[serde(default)]
    pub total_fees: Option<Amount>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

/// A single field-level rejection inside a validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Violation {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub path: String,
}

/// Structured 4xx body listing field-level violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    pub code: String,
    pub message: String,
    pub violations: Vec<Violation>,
}

/// Body for creating or updating a bank funding source. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSourceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_type: Option<BankAccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FundingSourceRequest {
    pub fn is_empty(&self) -> bool {
        self.routing_number.is_none()
            && self.account_number.is_none()
            && self.bank_account_type.is_none()
            && self.name.is_none()
    }
}

/// Body for verifying the two micro-deposit amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MicroDepositRequest {
    pub amount1: Amount,
    pub amount2: Amount,
}
