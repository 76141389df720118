//! Table rendering for resources and collections
//!
//! A single resource is a borderless two-column field/value table; a list is
//! one bordered table with an optional totals footer.

use std::io::{self, Write};

use comfy_table::presets::{NOTHING, UTF8_FULL_CONDENSED};
use comfy_table::{Cell, CellAlignment, Table, TableComponent};

use crate::domain::{Collection, Describe, Row, Tabular};

/// Write a resource as a right-aligned `label │ value` table framed by blank lines.
pub fn render_resource(out: &mut dyn Write, resource: &dyn Describe) -> io::Result<()> {
    writeln!(out)?;
    let table = resource_table(resource);
    if !table.is_empty() {
        writeln!(out, "{table}")?;
    }
    writeln!(out)
}

/// The field table without surrounding blank lines; empty when there are no fields.
pub fn resource_table(resource: &dyn Describe) -> String {
    let fields = resource.fields();
    if fields.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_style(TableComponent::VerticalLines, '│');
    for field in fields {
        table.add_row(vec![
            Cell::new(flatten(field.label)).set_alignment(CellAlignment::Right),
            Cell::new(flatten(&field.value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

/// Write a bordered list table framed by blank lines.
pub fn render_table(
    out: &mut dyn Write,
    header: &[String],
    rows: &[Row],
    footer: Option<&Row>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", collection_table(header, rows, footer))?;
    writeln!(out)
}

/// Header, rows in given order, and a footer set off by a copy of the header separator.
pub fn collection_table(header: &[String], rows: &[Row], footer: Option<&Row>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    if !header.is_empty() {
        table.set_header(header.iter().map(|h| flatten(h)));
    }
    for row in rows {
        table.add_row(row.iter().map(|c| flatten(c)));
    }
    if let Some(footer) = footer {
        table.add_row(footer.iter().map(|c| flatten(c)));
    }

    let rendered = table.to_string();
    if footer.is_none() || rows.is_empty() || header.is_empty() {
        return rendered;
    }

    // lines: top border, header, header separator, rows..., footer, bottom border
    let mut lines: Vec<&str> = rendered.lines().collect();
    if lines.len() < 5 {
        return rendered;
    }
    let separator = lines[2];
    let footer_at = lines.len() - 2;
    lines.insert(footer_at, separator);
    lines.join("\n")
}

/// Write a typed collection with its columns and a `Total` footer.
pub fn render_collection<T: Tabular>(
    out: &mut dyn Write,
    collection: &Collection<T>,
) -> io::Result<()> {
    let header = T::header();
    let rows: Vec<Row> = collection.items().iter().map(T::row).collect();
    let footer = total_footer(header.len(), collection.total());
    render_table(out, &header, &rows, Some(&footer))
}

/// Footer row of `width` cells with `Total` and the count in the two right-most cells.
pub fn total_footer(width: usize, total: u64) -> Row {
    let width = width.max(2);
    let mut footer = vec![String::new(); width - 2];
    footer.push("Total".to_string());
    footer.push(total.to_string());
    footer
}

fn flatten(text: &str) -> String {
    if text.contains(['\n', '\r']) {
        text.split(['\n', '\r'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        text.to_string()
    }
}
