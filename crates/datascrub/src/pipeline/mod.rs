//! Pipeline module.
//!
//! This module provides the main cleaning pipeline and its stages that
//! operate on whole rows or columns: outlier handling and normalization.

mod builder;
pub mod normalizer;
pub mod outliers;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use normalizer::Normalizer;
pub use outliers::OutlierHandler;
pub use progress::{ClosureProgressReporter, CleaningStage, ProgressReporter, ProgressUpdate};
