//! Dictionary listing command.

use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use treesift_core::config::IndexConfig;

use crate::OutputFormat;
use crate::load;
use crate::output::{self, Format};

#[derive(Serialize)]
struct KeywordRow {
    id: u32,
    keyword: String,
}

/// Run the keywords command.
pub fn run(
    path: &Path,
    config: IndexConfig,
    prefix: &str,
    limit: Option<usize>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let index = load::build_index(path, config)?;
    let dictionary = index.keywords();
    let rows: Vec<KeywordRow> = dictionary
        .iter_prefix(prefix)
        .take(limit.unwrap_or(usize::MAX))
        .map(|(keyword, id)| KeywordRow { id, keyword })
        .collect();

    let format = Format::from(format);
    output::emit(&rows, format, quiet, |rows| {
        let mut table = output::table(&["Id", "Keyword"]);
        for row in rows {
            table.add_row(vec![output::key(row.id), Cell::new(&row.keyword)]);
        }
        table
    })?;

    let range = dictionary
        .prefix_range(prefix)
        .map_or_else(|| "none".to_string(), |r| format!("{}..={}", r.start(), r.end()));
    output::note(
        &format!("{} of {} keywords, ids {range}", rows.len(), dictionary.len()),
        format,
        quiet,
    );

    Ok(())
}
