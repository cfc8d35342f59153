//! Rendering of command results as tables or JSON.

use std::fmt;

use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Output format selection.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl From<crate::OutputFormat> for Format {
    fn from(f: crate::OutputFormat) -> Self {
        match f {
            crate::OutputFormat::Table => Format::Table,
            crate::OutputFormat::Json => Format::Json,
        }
    }
}

/// Prints `data` as pretty JSON, or as the table `render` builds from it.
pub fn emit<T, F>(data: &T, format: Format, quiet: bool, render: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> Table,
{
    if quiet {
        return Ok(());
    }
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(data)?),
        Format::Table => println!("{}", render(data)),
    }
    Ok(())
}

/// Creates a table with the given column headers.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    table
}

/// A highlighted first-column cell: a code, an identifier or a property.
pub fn key(text: impl fmt::Display) -> Cell {
    Cell::new(text.to_string()).fg(Color::Green)
}

/// Builds a two-column property table.
pub fn properties(items: &[(&str, String)]) -> Table {
    let mut out = table(&["Property", "Value"]);
    for (name, value) in items {
        out.add_row(vec![key(name), Cell::new(value)]);
    }
    out
}

/// Prints a summary line under a table.
pub fn note(msg: &str, format: Format, quiet: bool) {
    if format == Format::Table && !quiet {
        println!("{msg}");
    }
}

/// Prints an error message.
pub fn error(msg: &str) {
    eprintln!("✗ {msg}");
}
