use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-column entry of the loader report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}

/// Shape, types, missingness and duplicates of a freshly loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub column_summaries: Vec<ColumnSummary>,
    pub duplicate_count: usize,
}

impl DatasetSummary {
    /// Total missing cells across every column.
    pub fn total_missing(&self) -> usize {
        self.column_summaries.iter().map(|c| c.null_count).sum()
    }
}

// ============================================================================
// Pipeline Summary Types
// ============================================================================

/// Human-readable summary of what the pipeline did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Number of rows before cleaning.
    pub rows_before: usize,
    /// Number of rows after cleaning.
    pub rows_after: usize,
    /// Number of rows removed by any stage.
    pub rows_removed: usize,
    /// Number of columns (never changes).
    pub columns: usize,

    /// Rows collapsed by deduplication.
    pub duplicates_removed: usize,
    /// Missing cells before imputation.
    pub missing_before: usize,
    /// Missing cells after imputation.
    pub missing_after: usize,
    /// Rows flagged by z-score detection.
    pub outliers_flagged: usize,
    /// Numeric columns rescaled to [0, 1].
    pub normalized_columns: Vec<String>,

    /// Warnings and notes generated during cleaning.
    pub warnings: Vec<String>,
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the summary.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Calculate the percentage of rows removed.
    pub fn rows_removed_percentage(&self) -> f32 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_removed as f32 / self.rows_before as f32) * 100.0
        }
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The cleaned dataset.
    pub data: DataFrame,
    /// One entry per action taken, in order.
    pub processing_steps: Vec<String>,
    pub summary: CleaningSummary,
    /// Where the dataset was written, if it was.
    pub output_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_removed_percentage() {
        let mut summary = CleaningSummary::new();
        assert_eq!(summary.rows_removed_percentage(), 0.0);

        summary.rows_before = 8;
        summary.rows_removed = 2;
        assert_eq!(summary.rows_removed_percentage(), 25.0);
    }

    #[test]
    fn test_dataset_summary_total_missing() {
        let summary = DatasetSummary {
            rows: 3,
            columns: 2,
            column_summaries: vec![
                ColumnSummary { name: "a".into(), dtype: "i64".into(), null_count: 1 },
                ColumnSummary { name: "b".into(), dtype: "str".into(), null_count: 2 },
            ],
            duplicate_count: 0,
        };
        assert_eq!(summary.total_missing(), 3);
    }
}
