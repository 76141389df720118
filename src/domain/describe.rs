//! Field descriptors for rendering resources and list rows
//!
//! Every resource kind declares the fields it shows as an ordered list of
//! `(label, accessor)` pairs. Transport metadata (`_links`) is simply never
//! listed, so it can not leak into output.

use itertools::Itertools;

use crate::domain::entities::{
    Account, Balance, FundingSource, MassPayment, MicroDeposits, Transfer,
};

/// One rendered cell of a resource listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// A displayable field: label plus accessor producing its text.
pub struct FieldSpec<T> {
    pub label: &'static str,
    pub value: fn(&T) -> String,
}

/// Ordered cells of one table row.
pub type Row = Vec<String>;

/// Evaluate a descriptor against a value.
pub fn describe_with<T>(value: &T, specs: &[FieldSpec<T>]) -> Vec<Field> {
    specs
        .iter()
        .map(|spec| Field {
            label: spec.label,
            value: (spec.value)(value),
        })
        .collect()
}

/// Capability to list labelled fields for the two-column resource view.
pub trait Describe {
    fn fields(&self) -> Vec<Field>;
}

/// Capability to appear as a row in a collection table.
pub trait Tabular: Sized + 'static {
    /// Key of the `_embedded` map holding this kind in list responses.
    const COLLECTION: &'static str;
    const COLUMNS: &'static [FieldSpec<Self>];

    fn header() -> Row {
        Self::COLUMNS.iter().map(|c| c.label.to_string()).collect()
    }

    fn row(&self) -> Row {
        Self::COLUMNS.iter().map(|c| (c.value)(self)).collect()
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn display<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

#[rustfmt::skip]
const ACCOUNT_FIELDS: &[FieldSpec<Account>] = &[
    FieldSpec { label: "ID", value: |a| a.id.clone() },
    FieldSpec { label: "Name", value: |a| a.name.clone() },
    FieldSpec { label: "Type", value: |a| text(&a.account_type) },
    FieldSpec { label: "Timezone Offset", value: |a| display(&a.timezone_offset) },
];

#[rustfmt::skip]
const FUNDING_SOURCE_FIELDS: &[FieldSpec<FundingSource>] = &[
    FieldSpec { label: "ID", value: |s| s.id.clone() },
    FieldSpec { label: "Status", value: |s| s.status.to_string() },
    FieldSpec { label: "Type", value: |s| s.source_type.to_string() },
    FieldSpec { label: "Bank Account Type", value: |s| display(&s.bank_account_type) },
    FieldSpec { label: "Name", value: |s| s.name.clone() },
    FieldSpec { label: "Bank Name", value: |s| text(&s.bank_name) },
    FieldSpec { label: "Channels", value: |s| s.channels.iter().join(", ") },
    FieldSpec { label: "Fingerprint", value: |s| text(&s.fingerprint) },
    FieldSpec { label: "Removed", value: |s| s.removed.to_string() },
    FieldSpec { label: "Created", value: |s| s.created.clone() },
];

#[rustfmt::skip]
const BALANCE_FIELDS: &[FieldSpec<Balance>] = &[
    FieldSpec { label: "Balance", value: |b| display(&b.balance) },
    FieldSpec { label: "Total", value: |b| display(&b.total) },
    FieldSpec { label: "Last Updated", value: |b| text(&b.last_updated) },
];

#[rustfmt::skip]
const MICRO_DEPOSITS_FIELDS: &[FieldSpec<MicroDeposits>] = &[
    FieldSpec { label: "Status", value: |m| m.status.to_string() },
    FieldSpec { label: "Created", value: |m| text(&m.created) },
    FieldSpec { label: "Failure", value: |m| display(&m.failure) },
];

#[rustfmt::skip]
const TRANSFER_FIELDS: &[FieldSpec<Transfer>] = &[
    FieldSpec { label: "ID", value: |t| t.id.clone() },
    FieldSpec { label: "Status", value: |t| t.status.to_string() },
    FieldSpec { label: "Amount", value: |t| t.amount.to_string() },
    FieldSpec { label: "Created", value: |t| t.created.clone() },
    FieldSpec { label: "Clearing", value: |t| display(&t.clearing) },
    FieldSpec { label: "Correlation ID", value: |t| text(&t.correlation_id) },
];

#[rustfmt::skip]
const MASS_PAYMENT_FIELDS: &[FieldSpec<MassPayment>] = &[
    FieldSpec { label: "ID", value: |m| m.id.clone() },
    FieldSpec { label: "Status", value: |m| m.status.to_string() },
    FieldSpec { label: "Total", value: |m| display(&m.total) },
    FieldSpec { label: "Total Fees", value: |m| display(&m.total_fees) },
    FieldSpec { label: "Created", value: |m| m.created.clone() },
    FieldSpec { label: "Correlation ID", value: |m| text(&m.correlation_id) },
];

impl Describe for Account {
    fn fields(&self) -> Vec<Field> {
        describe_with(self, ACCOUNT_FIELDS)
    }
}

impl Describe for FundingSource {
    fn fields(&self) -> Vec<Field> {
        describe_with(self, FUNDING_SOURCE_FIELDS)
    }
}

impl Describe for Balance {
    fn fields(&self) -> Vec<Field> {
        describe_with(self, BALANCE_FIELDS)
    }
}

impl Describe for MicroDeposits {
    fn fields(&self) -> Vec<Field> {
        describe_with(self, MICRO_DEPOSITS_FIELDS)
    }
}

impl Describe for Transfer {
    fn fields(&self) -> Vec<Field> {
        describe_with(self, TRANSFER_FIELDS)
    }
}

impl Describe for MassPayment {
    fn fields(&self) -> Vec<Field> {
        describe_with(self, MASS_PAYMENT_FIELDS)
    }
}

impl Tabular for Transfer {
    const COLLECTION: &'static str = "transfers";
    #[rustfmt::skip]
    const COLUMNS: &'static [FieldSpec<Self>] = &[
        FieldSpec { label: "ID", value: |t| t.id.clone() },
        FieldSpec { label: "Status", value: |t| t.status.to_string() },
        FieldSpec { label: "Amount", value: |t| t.amount.to_string() },
        FieldSpec { label: "Created", value: |t| t.created.clone() },
        FieldSpec { label: "Correlation ID", value: |t| text(&t.correlation_id) },
    ];
}

impl Tabular for MassPayment {
    const COLLECTION: &'static str = "mass-payments";
    #[rustfmt::skip]
    const COLUMNS: &'static [FieldSpec<Self>] = &[
        FieldSpec { label: "ID", value: |m| m.id.clone() },
        FieldSpec { label: "Status", value: |m| m.status.to_string() },
        FieldSpec { label: "Total Amount", value: |m| display(&m.total) },
        FieldSpec { label: "Total Fees Amount", value: |m| display(&m.total_fees) },
        FieldSpec { label: "Created", value: |m| m.created.clone() },
        FieldSpec { label: "Correlation ID", value: |m| text(&m.correlation_id) },
    ];
}

impl Tabular for FundingSource {
    const COLLECTION: &'static str = "funding-sources";
    #[rustfmt::skip]
    const COLUMNS: &'static [FieldSpec<Self>] = &[
        FieldSpec { label: "ID", value: |s| s.id.clone() },
        FieldSpec { label: "Status", value: |s| s.status.to_string() },
        FieldSpec { label: "Type", value: |s| s.source_type.to_string() },
        FieldSpec { label: "Account Type", value: |s| display(&s.bank_account_type) },
        FieldSpec { label: "Name", value: |s| s.name.clone() },
        FieldSpec { label: "Bank Name", value: |s| text(&s.bank_name) },
        FieldSpec { label: "Removed", value: |s| s.removed.to_string() },
        FieldSpec { label: "Created", value: |s| s.created.clone() },
    ];
}

/// Closed set of resource kinds the client can render.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Account(Account),
    FundingSource(FundingSource),
    Balance(Balance),
    MicroDeposits(MicroDeposits),
    Transfer(Transfer),
    MassPayment(MassPayment),
}

impl Describe for Resource {
    fn fields(&self) -> Vec<Field> {
        match self {
            Resource::Account(r) => r.fields(),
            Resource::FundingSource(r) => r.fields(),
            Resource::Balance(r) => r.fields(),
            Resource::MicroDeposits(r) => r.fields(),
            Resource::Transfer(r) => r.fields(),
            Resource::MassPayment(r) => r.fields(),
        }
    }
}

macro_rules! resource_from {
    ($($variant:ident),+) => {
        $(impl From<$variant> for Resource {
            fn from(value: $variant) -> Self {
                Resource::$variant(value)
            }
        })+
    };
}

resource_from!(Account, FundingSource, Balance, MicroDeposits, Transfer, MassPayment);
