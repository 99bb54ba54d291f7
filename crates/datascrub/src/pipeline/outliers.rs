//! Outlier handling module.
//!
//! Outliers are found with the z-score method: for each numeric column,
//! `(x - mean) / std` with the population standard deviation. A row is
//! flagged when any of its numeric cells scores strictly above the threshold
//! in absolute value.
//!
//! Replacement works on whole rows. Under `replace_mean` and
//! `replace_median` every numeric cell of a flagged row is overwritten, not
//! just the cell that pushed the row over the threshold.

use crate::config::OutlierStrategy;
use crate::error::Result;
use crate::utils::{numeric_column_names, population_std};
use polars::prelude::*;
use tracing::{debug, warn};

/// Handles outlier detection and treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Flag rows where any numeric column has `|z| > threshold`.
    ///
    /// Missing cells are never flagged. A column with zero spread contributes
    /// no flags.
    pub fn detect_outliers(df: &DataFrame, threshold: f64) -> Result<BooleanChunked> {
        let mut flags = vec![false; df.height()];

        for col_name in numeric_column_names(df) {
            let series = df.column(&col_name)?.as_materialized_series();
            let (Some(mean), Some(std)) = (series.mean(), population_std(series)?) else {
                continue;
            };
            if std == 0.0 || !std.is_finite() {
                debug!("Skipping '{}' for outlier detection: zero spread", col_name);
                continue;
            }

            let float_series = series.cast(&DataType::Float64)?;
            for (row, value) in float_series.f64()?.into_iter().enumerate() {
                if let Some(x) = value
                    && ((x - mean) / std).abs() > threshold
                {
                    flags[row] = true;
                }
            }
        }

        Ok(BooleanChunked::from_slice("outliers".into(), &flags))
    }

    /// Handle outliers based on the selected strategy.
    ///
    /// Returns the number of rows that were flagged.
    pub fn handle_outliers(
        df: &mut DataFrame,
        strategy: OutlierStrategy,
        threshold: f64,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let outliers = Self::detect_outliers(df, threshold)?;
        let flagged = outliers.sum().unwrap_or(0) as usize;
        debug!(
            "Flagged {} outlier rows at threshold {}",
            flagged, threshold
        );

        match strategy {
            OutlierStrategy::Remove => Self::remove_outliers(df, &outliers, processing_steps)?,
            OutlierStrategy::ReplaceMean => {
                Self::replace_outliers(df, &outliers, processing_steps, "mean")?
            }
            OutlierStrategy::ReplaceMedian => {
                Self::replace_outliers(df, &outliers, processing_steps, "median")?
            }
            OutlierStrategy::Keep => {
                if flagged > 0 {
                    warn!("Kept {} outlier rows unchanged", flagged);
                }
                processing_steps.push(format!("Kept {} outlier rows as-is", flagged));
            }
        }

        Ok(flagged)
    }

    /// Parse a strategy selector and apply it.
    ///
    /// Unrecognized selectors leave the dataset unchanged.
    pub fn handle_outliers_str(
        df: &mut DataFrame,
        strategy: &str,
        threshold: f64,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        Self::handle_outliers(df, OutlierStrategy::from(strategy), threshold, processing_steps)
    }

    /// Drop flagged rows.
    fn remove_outliers(
        df: &mut DataFrame,
        outliers: &BooleanChunked,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let original_rows = df.height();
        let keep = !outliers;
        *df = df.filter(&keep)?;

        let rows_removed = original_rows - df.height();
        if rows_removed > 0 {
            processing_steps.push(format!("Removed {} rows containing outliers", rows_removed));
            debug!("Removed {} outlier rows", rows_removed);
        }

        Ok(())
    }

    /// Overwrite every numeric cell of each flagged row with its column aggregate.
    ///
    /// Aggregates are taken over the whole column, flagged rows included,
    /// before any cell is replaced.
    fn replace_outliers(
        df: &mut DataFrame,
        outliers: &BooleanChunked,
        processing_steps: &mut Vec<String>,
        method: &str,
    ) -> Result<()> {
        let flagged = outliers.sum().unwrap_or(0);
        if flagged == 0 {
            return Ok(());
        }

        let flags: Vec<bool> = outliers.into_iter().map(|v| v.unwrap_or(false)).collect();

        for col_name in numeric_column_names(df) {
            let series = df.column(&col_name)?.as_materialized_series().clone();
            let aggregate = match method {
                "median" => series.median(),
                _ => series.mean(),
            };
            let Some(aggregate) = aggregate else {
                continue;
            };

            let float_series = series.cast(&DataType::Float64)?;
            let replaced: Vec<Option<f64>> = float_series
                .f64()?
                .into_iter()
                .zip(flags.iter())
                .map(|(value, &is_outlier)| if is_outlier { Some(aggregate) } else { value })
                .collect();

            df.replace(&col_name, Series::new(col_name.as_str().into(), replaced))?;
            processing_steps.push(format!(
                "Replaced '{}' in {} outlier rows with {}: {:.2}",
                col_name, flagged, method, aggregate
            ));
        }

        Ok(())
    }
}
