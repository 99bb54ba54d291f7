use crate::config::CleaningConfig;
use crate::error::{Result, ResultExt};
use crate::types::{CleaningSummary, PipelineResult};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Report of a single cleaning run, for `--json` and `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Path to the output file (if written)
    pub output_file: Option<String>,

    pub missing_strategy: String,
    pub outlier_strategy: String,
    pub outlier_threshold: f64,
    pub constant_column: String,
    pub remove_duplicates: bool,

    /// Counts and timings for the run
    pub summary: CleaningSummary,
    /// One entry per action taken, in order
    pub processing_steps: Vec<String>,
}

/// Writes cleaned datasets and run reports.
pub struct ReportGenerator {
    output_path: PathBuf,
}

impl ReportGenerator {
    /// Create a generator that writes datasets to `output_path`.
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Write `df` as CSV with a header row and no index column.
    ///
    /// Missing cells are written as empty fields. An existing file is
    /// overwritten and parent directories are created as needed.
    pub fn write_dataset(&self, df: &mut DataFrame) -> Result<PathBuf> {
        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.output_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .context(format!("Failed to write {}", self.output_path.display()))?;

        info!("Dataset saved: {}", self.output_path.display());
        Ok(self.output_path.clone())
    }

    /// Build a report from a finished run.
    pub fn build_report(
        input_file: &str,
        result: &PipelineResult,
        config: &CleaningConfig,
    ) -> CleaningReport {
        CleaningReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            output_file: result
                .output_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            missing_strategy: config.missing_strategy.to_string(),
            outlier_strategy: config.outlier_strategy.to_string(),
            outlier_threshold: config.outlier_threshold,
            constant_column: config.constant_column.as_str().to_string(),
            remove_duplicates: config.remove_duplicates,
            summary: result.summary.clone(),
            processing_steps: result.processing_steps.clone(),
        }
    }

    /// Write `report` as pretty JSON to `<dir>/<stem>_report.json`.
    pub fn write_report_to_file(
        report: &CleaningReport,
        dir: impl AsRef<Path>,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }

        let report_path = dir.join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
