//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Write error (red bold "error:" prefix)
pub fn error(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", "error".red().bold(), msg)
}

/// Write success status (green checkmark)
pub fn success(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green(), msg)
}

/// Write action in progress (green label)
pub fn action(out: &mut dyn Write, label: &str, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}

/// Write plain output (no color)
pub fn info(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_color_when_writing_action_then_plain_label_and_message() {
        colored::control::set_override(false);
        let mut out = Vec::new();

        action(&mut out, "Removing funding source", "fs-1").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Removing funding source: fs-1\n"
        );
    }
}
