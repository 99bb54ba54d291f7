//! Tabular Dataset Cleaning Library
//!
//! A small data cleaning library built with Rust and Polars.
//!
//! # Overview
//!
//! - **Loading**: CSV reading with fallbacks for malformed quoting, plus a
//!   summary of shape, types, missing values and duplicates
//! - **Deduplication**: exact duplicate rows collapsed to their first occurrence
//! - **Missing Values**: mean, median or mode fills, or listwise deletion
//! - **Outliers**: z-score detection with removal or row-wide replacement
//! - **Normalization**: min-max scaling of numeric columns to `[0, 1]`
//! - **Progress Reporting**: per-stage updates through a callback
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datascrub::{CleaningConfig, MissingValueStrategy, OutlierStrategy, Pipeline};
//!
//! let config = CleaningConfig::builder()
//!     .missing_strategy(MissingValueStrategy::Mode)
//!     .outlier_strategy(OutlierStrategy::ReplaceMedian)
//!     .outlier_threshold(3.0)
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run("data.csv")?;
//!
//! println!("Rows: {} -> {}", result.summary.rows_before, result.summary.rows_after);
//! ```
//!
//! # Inspection
//!
//! ```rust,ignore
//! use datascrub::DatasetLoader;
//!
//! let df = DatasetLoader::load("data.csv")?;
//! let summary = DatasetLoader::summarize(&df)?;
//! println!("{} duplicate rows", summary.duplicate_count);
//! println!("{}", DatasetLoader::head(&df, 5));
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{
    CleaningConfig, CleaningConfigBuilder, ConfigValidationError, ConstantColumnPolicy,
    MissingValueStrategy, OutlierStrategy,
};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::{MissingValueHandler, StatisticalImputer};
pub use loader::DatasetLoader;
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Normalizer, OutlierHandler, Pipeline,
    PipelineBuilder, ProgressReporter, ProgressUpdate,
};
pub use reporting::{CleaningReport, ReportGenerator};
pub use types::{CleaningSummary, ColumnSummary, DatasetSummary, PipelineResult};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype};
