//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. Strategy selectors parse from
//! the same strings the command line accepts, so a config file, a flag and
//! an interactive answer all go through one code path.

use crate::error::CleaningError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Default file the cleaned dataset is written to.
pub const DEFAULT_OUTPUT_PATH: &str = "cleaned_data.csv";

/// Default outlier threshold, in standard deviations.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

/// Strategy for handling missing values.
///
/// Parsing is strict: anything other than `mean`, `median`, `mode` or `drop`
/// is rejected with [`CleaningError::InvalidStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MissingValueStrategy {
    /// Fill numeric cells with the column mean
    #[default]
    Mean,
    /// Fill numeric cells with the column median
    Median,
    /// Fill cells with the column's first modal value
    Mode,
    /// Drop every row that contains a missing cell
    Drop,
}

impl MissingValueStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for MissingValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingValueStrategy {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "mode" => Ok(Self::Mode),
            "drop" => Ok(Self::Drop),
            other => Err(CleaningError::InvalidStrategy(other.to_string())),
        }
    }
}

impl TryFrom<String> for MissingValueStrategy {
    type Error = CleaningError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Strategy for handling rows flagged as outliers.
///
/// Unlike [`MissingValueStrategy`], parsing never fails: an unrecognized
/// string becomes [`OutlierStrategy::Keep`] and the dataset passes through
/// the outlier stage untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum OutlierStrategy {
    /// Drop flagged rows
    #[default]
    Remove,
    /// Overwrite every numeric cell of a flagged row with the column mean
    ReplaceMean,
    /// Overwrite every numeric cell of a flagged row with the column median
    ReplaceMedian,
    /// Leave the dataset unchanged
    Keep,
}

impl OutlierStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::ReplaceMean => "replace_mean",
            Self::ReplaceMedian => "replace_median",
            Self::Keep => "keep",
        }
    }
}

impl fmt::Display for OutlierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for OutlierStrategy {
    fn from(s: &str) -> Self {
        match s.trim() {
            "remove" => Self::Remove,
            "replace_mean" => Self::ReplaceMean,
            "replace_median" => Self::ReplaceMedian,
            "keep" => Self::Keep,
            other => {
                warn!(
                    "Unrecognized outlier strategy '{}'; outliers will be left as-is",
                    other
                );
                Self::Keep
            }
        }
    }
}

impl From<String> for OutlierStrategy {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// What min-max scaling writes for a column whose minimum equals its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConstantColumnPolicy {
    /// Write 0.0 for every non-missing cell
    #[default]
    Zero,
    /// Write NaN, the result of dividing by a zero range
    Nan,
}

impl ConstantColumnPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Nan => "nan",
        }
    }
}

impl FromStr for ConstantColumnPolicy {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "nan" => Ok(Self::Nan),
            other => Err(CleaningError::InvalidConfig(format!(
                "unknown constant column policy '{}' (expected zero or nan)",
                other
            ))),
        }
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`CleaningConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use datascrub::config::{CleaningConfig, MissingValueStrategy, OutlierStrategy};
///
/// let config = CleaningConfig::builder()
///     .missing_strategy(MissingValueStrategy::Median)
///     .outlier_strategy(OutlierStrategy::ReplaceMean)
///     .outlier_threshold(2.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// How missing cells are filled or removed.
    /// Default: Mean
    pub missing_strategy: MissingValueStrategy,

    /// How rows flagged as outliers are treated.
    /// Default: Remove
    pub outlier_strategy: OutlierStrategy,

    /// Z-score above which a value marks its row as an outlier.
    /// Must be finite and non-negative.
    /// Default: 3.0
    pub outlier_threshold: f64,

    /// Min-max scaling result for constant numeric columns.
    /// Default: Zero
    pub constant_column: ConstantColumnPolicy,

    /// Whether to collapse duplicate rows before imputation.
    /// Default: true
    pub remove_duplicates: bool,

    /// Where the cleaned dataset is written. Existing files are overwritten.
    /// Default: "cleaned_data.csv"
    pub output_path: PathBuf,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            missing_strategy: MissingValueStrategy::default(),
            outlier_strategy: OutlierStrategy::default(),
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            constant_column: ConstantColumnPolicy::default(),
            remove_duplicates: true,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values. The result is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CleaningError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: CleaningConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.outlier_threshold.is_finite() || self.outlier_threshold < 0.0 {
            return Err(ConfigValidationError::InvalidThreshold(
                self.outlier_threshold,
            ));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyOutputPath);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid outlier threshold: {0} (must be a finite, non-negative number)")]
    InvalidThreshold(f64),

    #[error("Output path must not be empty")]
    EmptyOutputPath,
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    missing_strategy: Option<MissingValueStrategy>,
    outlier_strategy: Option<OutlierStrategy>,
    outlier_threshold: Option<f64>,
    constant_column: Option<ConstantColumnPolicy>,
    remove_duplicates: Option<bool>,
    output_path: Option<PathBuf>,
}

impl CleaningConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    pub fn from_config(config: &CleaningConfig) -> Self {
        Self {
            missing_strategy: Some(config.missing_strategy),
            outlier_strategy: Some(config.outlier_strategy),
            outlier_threshold: Some(config.outlier_threshold),
            constant_column: Some(config.constant_column),
            remove_duplicates: Some(config.remove_duplicates),
            output_path: Some(config.output_path.clone()),
        }
    }

    /// Set the missing-value strategy.
    pub fn missing_strategy(mut self, strategy: MissingValueStrategy) -> Self {
        self.missing_strategy = Some(strategy);
        self
    }

    /// Set the outlier handling strategy.
    pub fn outlier_strategy(mut self, strategy: OutlierStrategy) -> Self {
        self.outlier_strategy = Some(strategy);
        self
    }

    /// Set the outlier threshold in standard deviations.
    ///
    /// # Arguments
    /// * `threshold` - e.g. 3.0 flags values more than three standard
    ///   deviations from their column mean
    pub fn outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = Some(threshold);
        self
    }

    /// Set the normalization result for constant columns.
    pub fn constant_column(mut self, policy: ConstantColumnPolicy) -> Self {
        self.constant_column = Some(policy);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Set the output file for the cleaned dataset.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let config = CleaningConfig {
            missing_strategy: self.missing_strategy.unwrap_or_default(),
            outlier_strategy: self.outlier_strategy.unwrap_or_default(),
            outlier_threshold: self
                .outlier_threshold
                .unwrap_or(DEFAULT_OUTLIER_THRESHOLD),
            constant_column: self.constant_column.unwrap_or_default(),
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
            output_path: self
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        };

        config.validate()?;
        Ok(config)
    }
}
