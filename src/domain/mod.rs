//! Domain layer: payments API resources, filters and field descriptors
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod collection;
pub mod describe;
pub mod entities;
pub mod error;
pub mod query;

pub use collection::Collection;
pub use describe::{describe_with, Describe, Field, FieldSpec, Resource, Row, Tabular};
pub use entities::*;
pub use error::DomainError;
pub use query::{FilterSet, FilterValue, PageFilters, Query, TransferFilters};
