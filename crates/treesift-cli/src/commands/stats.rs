//! Index statistics command.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use treesift_core::config::IndexConfig;

use crate::OutputFormat;
use crate::load;
use crate::output::{self, Format};

#[derive(Serialize)]
struct StatsOutput {
    node_count: usize,
    top_level_count: usize,
    keyword_count: usize,
    trie_node_count: usize,
    memory_bytes: usize,
    linking: String,
    resolution: String,
}

/// Format bytes with a binary unit suffix.
fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Run the stats command.
pub fn run(path: &Path, config: IndexConfig, format: OutputFormat, quiet: bool) -> Result<()> {
    let index = load::build_index(path, config)?;

    let stats = StatsOutput {
        node_count: index.node_count(),
        top_level_count: index.roots().len(),
        keyword_count: index.keywords().len(),
        trie_node_count: index.keywords().trie().node_count(),
        memory_bytes: index.size_bytes(),
        linking: index.config().linking.to_string(),
        resolution: index.config().resolution.to_string(),
    };

    output::emit(&stats, Format::from(format), quiet, |stats| {
        output::properties(&[
            ("Nodes", stats.node_count.to_string()),
            ("Top-level Nodes", stats.top_level_count.to_string()),
            ("Keywords", stats.keyword_count.to_string()),
            ("Trie Nodes", stats.trie_node_count.to_string()),
            ("Memory Usage", format_bytes(stats.memory_bytes)),
            ("Linking", stats.linking.clone()),
            ("Resolution", stats.resolution.clone()),
        ])
    })
}
