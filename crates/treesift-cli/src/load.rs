//! Reading records and building the index.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use treesift_core::config::IndexConfig;
use treesift_core::tree::{ClassificationIndex, Record};

/// Reads a JSON array of `{code, parent, title}` records.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse records in {}", path.display()))
}

/// Reads `path` and builds an index over its records.
pub fn build_index(path: &Path, config: IndexConfig) -> Result<ClassificationIndex> {
    let records = read_records(path)?;
    let count = records.len();
    let index = ClassificationIndex::from_records(records, config)
        .with_context(|| format!("cannot index {}", path.display()))?;
    tracing::debug!(records = count, path = %path.display(), "loaded classification");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_parent_defaults_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"code": "A", "title": "Agriculture"}}, {{"code": "01", "parent": "A", "title": "Crops"}}]"#
        )
        .unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(
            records,
            vec![Record::top_level("A", "Agriculture"), Record::new("01", "A", "Crops")]
        );
    }

    #[test]
    fn test_missing_file() {
        let err = read_records(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(err.to_string().starts_with("cannot open"));
    }

    #[test]
    fn test_build_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"code": "01", "parent": "A", "title": "Crops"}}]"#).unwrap();

        let err = build_index(file.path(), IndexConfig::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("cannot index"));
        assert!(message.contains("record 0: invalid parent"));
    }
}
