//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating load, deduplication, imputation, outlier handling,
//! normalization and output.

use crate::cleaner::DataCleaner;
use crate::config::{CleaningConfig, ConfigValidationError, OutlierStrategy};
use crate::error::Result;
use crate::imputers::MissingValueHandler;
use crate::loader::DatasetLoader;
use crate::pipeline::normalizer::Normalizer;
use crate::pipeline::outliers::OutlierHandler;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::reporting::ReportGenerator;
use crate::types::{CleaningSummary, PipelineResult};
use crate::utils::count_missing;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Share of rows removed above which the summary carries a warning.
const HIGH_ROW_LOSS_PERCENT: f32 = 30.0;

/// The main cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use datascrub::{CleaningConfig, MissingValueStrategy, Pipeline};
///
/// let config = CleaningConfig::builder()
///     .missing_strategy(MissingValueStrategy::Median)
///     .outlier_threshold(2.0)
///     .output_path("out/clean.csv")
///     .build()?;
///
/// let result = Pipeline::builder()
///     .config(config)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run("data.csv")?;
/// ```
pub struct Pipeline {
    config: CleaningConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    reporter: ReportGenerator,
}

// Ensure Pipeline is Send (can be moved to another thread)
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Load `path`, clean it and write the result to the configured output path.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<PipelineResult> {
        let outcome = self.run_internal(path.as_ref());
        self.finish(outcome)
    }

    /// Clean an in-memory dataset without touching the filesystem.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        let outcome = self.clean(df, Instant::now());
        self.finish(outcome)
    }

    fn finish(&self, outcome: Result<PipelineResult>) -> Result<PipelineResult> {
        match outcome {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self, path: &Path) -> Result<PipelineResult> {
        let start_time = Instant::now();

        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            0.0,
            format!("Loading {}...", path.display()),
        ));
        let df = DatasetLoader::load(path)?;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            1.0,
            format!("Loaded {} rows x {} columns", df.height(), df.width()),
        ));

        let mut result = self.clean(df, start_time)?;

        self.report_progress(ProgressUpdate::new(
            CleaningStage::Writing,
            0.0,
            "Writing cleaned dataset...",
        ));
        info!("Writing cleaned dataset...");
        let output_path = self.reporter.write_dataset(&mut result.data)?;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Writing,
            1.0,
            format!("Saved to {}", output_path.display()),
        ));

        result.output_path = Some(output_path);
        result.summary.duration_ms = start_time.elapsed().as_millis() as u64;

        Ok(result)
    }

    fn clean(&self, df: DataFrame, start_time: Instant) -> Result<PipelineResult> {
        info!("Starting cleaning pipeline...");

        let mut summary = CleaningSummary::new();
        summary.rows_before = df.height();
        summary.columns = df.width();

        let mut processing_steps: Vec<String> = Vec::new();

        // Step 1: Deduplication
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Deduplication,
            0.0,
            "Removing duplicate rows...",
        ));
        let mut df = if self.config.remove_duplicates {
            info!("Step 1: Removing duplicate rows...");
            let (deduped, removed) = DataCleaner::remove_duplicates(&df)?;
            if removed > 0 {
                processing_steps.push(format!("Removed {} duplicate rows", removed));
            }
            summary.duplicates_removed = removed;
            deduped
        } else {
            info!("Step 1: Skipping deduplication (disabled)");
            df
        };
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Deduplication,
            1.0,
            format!("Removed {} duplicate rows", summary.duplicates_removed),
        ));

        // Step 2: Missing values
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Imputation,
            0.0,
            format!("Handling missing values ({})...", self.config.missing_strategy),
        ));
        info!("Step 2: Handling missing values...");
        summary.missing_before = count_missing(&df);
        MissingValueHandler::handle(&mut df, self.config.missing_strategy, &mut processing_steps)?;
        summary.missing_after = count_missing(&df);
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Imputation,
            1.0,
            format!(
                "Missing cells: {} -> {}",
                summary.missing_before, summary.missing_after
            ),
        ));

        // Step 3: Outliers
        self.report_progress(ProgressUpdate::new(
            CleaningStage::OutlierHandling,
            0.0,
            format!(
                "Detecting outliers (|z| > {})...",
                self.config.outlier_threshold
            ),
        ));
        info!("Step 3: Handling outliers...");
        summary.outliers_flagged = OutlierHandler::handle_outliers(
            &mut df,
            self.config.outlier_strategy,
            self.config.outlier_threshold,
            &mut processing_steps,
        )?;
        if self.config.outlier_strategy == OutlierStrategy::Keep && summary.outliers_flagged > 0 {
            summary.add_warning(format!(
                "{} outlier rows were detected but left unchanged",
                summary.outliers_flagged
            ));
        }
        self.report_progress(ProgressUpdate::new(
            CleaningStage::OutlierHandling,
            1.0,
            format!("Flagged {} outlier rows", summary.outliers_flagged),
        ));

        // Step 4: Normalization
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Normalization,
            0.0,
            "Normalizing numeric columns...",
        ));
        info!("Step 4: Normalizing numeric columns...");
        let steps_before = processing_steps.len();
        summary.normalized_columns =
            Normalizer::min_max(&mut df, self.config.constant_column, &mut processing_steps)?;
        for step in &processing_steps[steps_before..] {
            if step.contains("is constant") {
                summary.add_warning(step.clone());
            }
        }
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Normalization,
            1.0,
            format!("Normalized {} columns", summary.normalized_columns.len()),
        ));

        // Finalize summary
        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        summary.rows_after = df.height();
        summary.rows_removed = summary.rows_before.saturating_sub(summary.rows_after);

        if summary.rows_removed_percentage() > HIGH_ROW_LOSS_PERCENT {
            summary.add_warning(format!(
                "High data loss: {:.1}% of rows were removed",
                summary.rows_removed_percentage()
            ));
        }

        Ok(PipelineResult {
            data: df,
            processing_steps,
            summary,
            output_path: None,
        })
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleaningConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let reporter = ReportGenerator::new(config.output_path.clone());

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            reporter,
        })
    }
}
