//! Query builder: optional list filters to query parameters
//!
//! A filter only reaches the outgoing query when its value differs from the
//! zero value of its type (`""`, `0`, `false`). Parameters keep insertion
//! order, and every filter group inserts in alphabetical order of wire name.

use std::fmt;

/// A single filter value with its type's "unset" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl FilterValue {
    /// True when the value equals the sentinel of its type.
    pub fn is_unset(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Integer(n) => *n == 0,
            FilterValue::Flag(b) => !*b,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Integer(n) => write!(f, "{n}"),
            FilterValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<Option<String>> for FilterValue {
    fn from(value: Option<String>) -> Self {
        FilterValue::Text(value.unwrap_or_default())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Integer(i64::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

/// Ordered set of named filters for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<(&'static str, FilterValue)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter. Later filters with the same name are kept as well.
    pub fn with(mut self, name: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filters.push((name, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Consume the set and keep only values that differ from their sentinel.
    pub fn build(self) -> Query {
        Query(
            self.filters
                .into_iter()
                .filter(|(_, value)| !value.is_unset())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        )
    }
}

/// Query parameters handed to the API client, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Paging filters shared by mass payment listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFilters {
    pub correlation_id: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl PageFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        FilterSet::new()
            .with("correlationId", self.correlation_id.clone())
            .with("limit", self.limit)
            .with("offset", self.offset)
    }
}

/// Transfer search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferFilters {
    pub correlation_id: Option<String>,
    pub end_amount: Option<String>,
    pub end_date: Option<String>,
    pub limit: u32,
    pub offset: u32,
    pub search: Option<String>,
    pub start_amount: Option<String>,
    pub start_date: Option<String>,
    pub status: Option<String>,
}

impl TransferFilters {
    pub fn to_filter_set(&self) -> FilterSet {
        FilterSet::new()
            .with("correlationId", self.correlation_id.clone())
            .with("endAmount", self.end_amount.clone())
            .with("endDate", self.end_date.clone())
            .with("limit", self.limit)
            .with("offset", self.offset)
            .with("search", self.search.clone())
            .with("startAmount", self.start_amount.clone())
            .with("startDate", self.start_date.clone())
            .with("status", self.status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FilterValue::Text(String::new()), true)]
    #[case(FilterValue::Text("x".into()), false)]
    #[case(FilterValue::Integer(0), true)]
    #[case(FilterValue::Integer(-1), false)]
    #[case(FilterValue::Flag(false), true)]
    #[case(FilterValue::Flag(true), false)]
    fn given_value_when_checking_sentinel_then_matches_zero_value(
        #[case] value: FilterValue,
        #[case] unset: bool,
    ) {
        assert_eq!(value.is_unset(), unset);
    }

    #[test]
    fn given_mixed_filters_when_building_then_drops_sentinels_and_keeps_order() {
        let query = FilterSet::new()
            .with("search", "")
            .with("limit", 10u32)
            .with("removed", false)
            .with("offset", 0u32)
            .with("status", "processed")
            .with("includeFees", true)
            .build();

        assert_eq!(
            query.pairs(),
            &[
                ("limit".to_string(), "10".to_string()),
                ("status".to_string(), "processed".to_string()),
                ("includeFees".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn given_text_value_when_building_then_keeps_exact_value() {
        let query = FilterSet::new()
            .with("search", "  Jane Doe & Co ")
            .build();
        assert_eq!(query.get("search"), Some("  Jane Doe & Co "));
    }

    #[test]
    fn given_default_transfer_flags_when_building_then_only_limit_remains() {
        let filters = TransferFilters {
            limit: 25,
            ..Default::default()
        };

        let query = filters.to_filter_set().build();

        assert_eq!(query.keys(), vec!["limit"]);
        assert_eq!(query.get("limit"), Some("25"));
    }

    #[test]
    fn given_limit_and_status_when_building_transfer_query_then_no_other_keys() {
        let filters = TransferFilters {
            limit: 10,
            status: Some("processed".into()),
            ..Default::default()
        };

        let query = filters.to_filter_set().build();

        assert_eq!(query.keys(), vec!["limit", "status"]);
        assert_eq!(query.get("limit"), Some("10"));
        assert_eq!(query.get("status"), Some("processed"));
    }

    #[test]
    fn given_every_transfer_filter_when_building_then_emits_alphabetical_order() {
        let filters = TransferFilters {
            correlation_id: Some("c".into()),
            end_amount: Some("100.00".into()),
            end_date: Some("2024-12-31".into()),
            limit: 5,
            offset: 10,
            search: Some("rent".into()),
            start_amount: Some("1.00".into()),
            start_date: Some("2024-01-01".into()),
            status: Some("pending".into()),
        };

        let query = filters.to_filter_set().build();

        assert_eq!(
            query.keys(),
            vec![
                "correlationId",
                "endAmount",
                "endDate",
                "limit",
                "offset",
                "search",
                "startAmount",
                "startDate",
                "status"
            ]
        );
    }

    #[test]
    fn given_page_filters_with_offset_when_building_then_includes_offset() {
        let filters = PageFilters {
            correlation_id: None,
            limit: 25,
            offset: 50,
        };

        let query = filters.to_filter_set().build();

        assert_eq!(query.keys(), vec!["limit", "offset"]);
        assert_eq!(query.get("offset"), Some("50"));
    }

    #[test]
    fn given_empty_set_when_building_then_query_is_empty() {
        let set = FilterSet::new();
        assert!(set.is_empty());
        assert!(set.build().is_empty());
    }
}
