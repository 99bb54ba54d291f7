//! Dataset loading and first-look inspection.
//!
//! [`DatasetLoader::load`] reads a CSV file with a header row. Parsing is
//! attempted three ways before giving up: with standard quote handling,
//! without it, and finally from a cleaned copy of the content held in
//! memory. The file on disk is never modified.

use crate::cleaner::DataCleaner;
use crate::error::{CleaningError, Result};
use crate::types::{ColumnSummary, DatasetSummary};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Rows used for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Rows shown by [`DatasetLoader::head`] when no count is given.
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Loads delimited files and describes their contents.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Read a CSV file with a header row.
    ///
    /// Fails with [`CleaningError::FileNotFound`] when `path` does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CleaningError::FileNotFound(path.to_path_buf()));
        }

        info!("Loading dataset from: {}", path.display());
        let df = Self::load_csv_with_fallbacks(path)?;
        info!("Dataset loaded successfully: {:?}", df.shape());

        Ok(df)
    }

    /// Shape, per-column dtype and missing counts, and duplicate rows.
    pub fn summarize(df: &DataFrame) -> Result<DatasetSummary> {
        let column_summaries = df
            .get_columns()
            .iter()
            .map(|col| ColumnSummary {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                null_count: col.null_count(),
            })
            .collect();

        Ok(DatasetSummary {
            rows: df.height(),
            columns: df.width(),
            column_summaries,
            duplicate_count: DataCleaner::count_duplicates(df)?,
        })
    }

    /// The first `n` rows.
    pub fn head(df: &DataFrame, n: usize) -> DataFrame {
        df.head(Some(n))
    }

    fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
        let raw = std::fs::read_to_string(path)?;
        let content = drop_blank_lines(&raw);

        // Strategy 1: Standard loading with quote handling
        match Self::read_csv(&content, Some(b'"')) {
            Ok(df) => return Ok(df),
            Err(e) => {
                debug!("Standard loading failed: {}", e);
            }
        }

        // Strategy 2: Without quote handling
        match Self::read_csv(&content, None) {
            Ok(df) => return Ok(df),
            Err(e) => {
                debug!("Loading without quotes failed: {}", e);
            }
        }

        // Strategy 3: Pre-clean content
        Ok(Self::read_csv(&clean_csv_content(&content), Some(b'"'))?)
    }

    fn read_csv(content: &str, quote_char: Option<u8>) -> PolarsResult<DataFrame> {
        let cursor = Cursor::new(content.as_bytes().to_vec());

        CsvReadOptions::default()
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_has_header(true)
            .with_parse_options(CsvParseOptions::default().with_quote_char(quote_char))
            .into_reader_with_file_handle(cursor)
            .finish()
    }
}

/// Remove lines that are empty or whitespace only.
///
/// Blank lines never hold a record, so they are skipped on every parse path.
fn drop_blank_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .fold(String::with_capacity(content.len()), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    drop_blank_lines(&content.replace("\"\"\"", "\"").replace("\"\"", "\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let err = DatasetLoader::load("does/not/exist.csv").unwrap_err();
        assert!(err.is_file_not_found());
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[test]
    fn test_load_infers_types_and_nulls() {
        let file = csv_file("id,score,city\n1,2.5,Oslo\n2,,Lima\n3,4.0,\n");

        let df = DatasetLoader::load(file.path()).unwrap();

        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("id").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("score").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("score").unwrap().null_count(), 1);
        assert_eq!(df.column("city").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_header_only() {
        let file = csv_file("a,b\n");

        let df = DatasetLoader::load(file.path()).unwrap();

        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_summarize() {
        let df = df![
            "a" => [Some(1i64), Some(2), Some(1), None],
            "b" => [Some("x"), Some("y"), Some("x"), None],
        ]
        .unwrap();

        let summary = DatasetLoader::summarize(&df).unwrap();

        assert_eq!(summary.rows, 4);
        assert_eq!(summary.columns, 2);
        assert_eq!(summary.duplicate_count, 1);
        assert_eq!(summary.total_missing(), 2);
        assert_eq!(summary.column_summaries[0].name, "a");
        assert_eq!(summary.column_summaries[0].dtype, "i64");
        assert_eq!(summary.column_summaries[1].dtype, "str");
    }

    #[test]
    fn test_head() {
        let df = df![
            "a" => [1, 2, 3, 4, 5, 6, 7],
        ]
        .unwrap();

        assert_eq!(DatasetLoader::head(&df, DEFAULT_HEAD_ROWS).height(), 5);
        assert_eq!(DatasetLoader::head(&df, 100).height(), 7);
    }

    #[test]
    fn test_clean_csv_content() {
        let cleaned = clean_csv_content("a,b\n\n\"\"x\"\",1\n   \n");
        assert_eq!(cleaned, "a,b\n\"x\",1\n");
    }

    #[test]
    fn test_drop_blank_lines_keeps_quotes() {
        let cleaned = drop_blank_lines("a,b\r\n\"said \"\"hi\"\"\",1\r\n\r\n");
        assert_eq!(cleaned, "a,b\n\"said \"\"hi\"\"\",1\n");
    }

    #[test]
    fn test_load_skips_trailing_blank_line() {
        let file = csv_file("a,b\n1,10\n2,20\n3,30\n\n");

        let df = DatasetLoader::load(file.path()).unwrap();
        let summary = DatasetLoader::summarize(&df).unwrap();

        assert_eq!(df.shape(), (3, 2));
        assert_eq!(summary.total_missing(), 0);
        assert_eq!(summary.duplicate_count, 0);
    }

    #[test]
    fn test_load_skips_blank_lines_mid_file() {
        let file = csv_file("name,v\nalpha,1\n\nbeta,2\n  \n");

        let df = DatasetLoader::load(file.path()).unwrap();

        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("name").unwrap().null_count(), 0);
        assert_eq!(df.column("v").unwrap().null_count(), 0);
    }

    #[test]
    fn test_load_falls_back_to_unquoted_parse() {
        // With quote handling the open quote swallows the line break and the
        // merged record has five fields
        let file = csv_file("a,b,c\n1,2,\"x\ny\",3,4\n");

        let df = DatasetLoader::load(file.path()).unwrap();

        assert_eq!(df.shape(), (2, 3));
        let c: Vec<Option<String>> = df
            .column("c")
            .unwrap()
            .cast(&DataType::String)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        assert_eq!(c, vec![Some("\"x".to_string()), Some("4".to_string())]);
    }
}
