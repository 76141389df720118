//! Terminal error reporting
//!
//! Prints a failure to the output stream and yields the process exit code.
//! Validation failures also list their violations as a `Field | Message` table.

use std::io::Write;

use crate::cli::error::CliError;
use crate::cli::output;
use crate::cli::render::{render_table, total_footer};
use crate::domain::Row;

const VIOLATION_HEADER: [&str; 2] = ["Field", "Message"];

/// Write `err` to `out` and return the exit code for it.
pub fn report_error(out: &mut dyn Write, err: &CliError) -> i32 {
    if let Err(e) = write_report(out, err) {
        eprintln!("error: {err} (could not write report: {e})");
    }
    err.exit_code()
}

fn write_report(out: &mut dyn Write, err: &CliError) -> std::io::Result<()> {
    output::error(out, err)?;

    if let Some(failure) = err.validation_failure() {
        let header: Row = VIOLATION_HEADER.iter().map(|h| h.to_string()).collect();
        let rows: Vec<Row> = failure
            .violations
            .iter()
            .map(|v| vec![v.path.clone(), v.message.clone()])
            .collect();
        let footer = total_footer(header.len(), rows.len() as u64);
        render_table(out, &header, &rows, Some(&footer))?;
    }
    out.flush()
}
