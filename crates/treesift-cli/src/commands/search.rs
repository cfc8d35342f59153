//! Query command.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Cell;
use serde::Serialize;
use treesift_core::config::IndexConfig;
use treesift_core::tree::{ClassificationIndex, Classifier};

use crate::OutputFormat;
use crate::load;
use crate::output::{self, Format};

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    parent: Option<&'a str>,
    matches: Vec<&'a Classifier>,
}

/// Run the search command.
pub fn run(
    path: &Path,
    config: IndexConfig,
    query: &str,
    children_of: Option<&str>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let index = load::build_index(path, config)?;
    let matches = match children_of {
        Some(code) => index
            .filter_children(code, query)
            .with_context(|| format!("no classifier with code '{code}'"))?,
        None => index.filter(query),
    };
    let found = matches.len();

    let format = Format::from(format);
    let result = SearchOutput {
        query,
        parent: children_of,
        matches,
    };
    output::emit(&result, format, quiet, |result| {
        let mut table = output::table(&["Code", "Title", "Children"]);
        for classifier in &result.matches {
            table.add_row(vec![
                output::key(&classifier.code),
                Cell::new(&classifier.title),
                Cell::new(child_count(&index, &classifier.code)),
            ]);
        }
        table
    })?;
    output::note(&format!("{found} match(es)"), format, quiet);

    Ok(())
}

fn child_count(index: &ClassificationIndex, code: &str) -> usize {
    index
        .find_by_code(code)
        .map_or(0, |node| node.children().len())
}
