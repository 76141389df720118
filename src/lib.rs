//! Command-line client for the Dwolla v2 payments API.
//!
//! Layers, innermost first: `domain` (resources, filters, field descriptors),
//! `application` (services), `infrastructure` (HTTP client, DI container),
//! `cli` (arguments, commands, rendering).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
