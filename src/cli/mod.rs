//! CLI layer: argument parsing, command dispatch and rendering

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod render;
pub mod report;

pub use args::{Cli, Commands};
pub use commands::{execute_command, run};
pub use error::{CliError, CliResult};
pub use report::report_error;
