//! Statistical imputation methods.
//!
//! Provides mean, median and mode fills plus listwise deletion.

use crate::error::Result;
use crate::utils::{
    boolean_mode, fill_boolean_nulls, fill_numeric_nulls, fill_string_nulls, numeric_mode,
    string_mode,
};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Apply median imputation for numeric columns.
    pub fn apply_numeric_median(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        if let Ok(col) = df.column(col_name) {
            let series = col.as_materialized_series().clone();
            if let Some(median_val) = series.median() {
                Self::fill_with_value(df, &series, median_val, processing_steps, "median")?;
            }
        }
        Ok(())
    }

    /// Apply mean imputation for numeric columns.
    pub fn apply_numeric_mean(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        if let Ok(col) = df.column(col_name) {
            let series = col.as_materialized_series().clone();
            if let Some(mean_val) = series.mean() {
                Self::fill_with_value(df, &series, mean_val, processing_steps, "mean")?;
            }
        }
        Ok(())
    }

    /// Apply mode imputation for numeric columns.
    ///
    /// When several values are equally frequent the smallest one is used.
    pub fn apply_numeric_mode(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        if let Ok(col) = df.column(col_name) {
            let series = col.as_materialized_series().clone();
            if let Some(mode_val) = numeric_mode(&series)? {
                Self::fill_with_value(df, &series, mode_val, processing_steps, "mode")?;
            }
        }
        Ok(())
    }

    /// Apply mode imputation for string columns.
    pub fn apply_string_mode(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        if let Ok(column) = df.column(col_name) {
            let series = column.as_materialized_series();
            if let Some(mode_val) = string_mode(series) {
                let missing = series.null_count();
                let filled = fill_string_nulls(series, &mode_val)?;
                df.replace(col_name, filled)?;

                processing_steps.push(format!(
                    "Filled {} missing values in '{}' with mode: '{}'",
                    missing, col_name, mode_val
                ));
            }
        }

        Ok(())
    }

    /// Apply mode imputation for Boolean columns.
    pub fn apply_boolean_mode(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        if let Ok(column) = df.column(col_name) {
            let series = column.as_materialized_series();
            if let Some(mode_val) = boolean_mode(series) {
                let missing = series.null_count();
                let filled = fill_boolean_nulls(series, mode_val)?;
                df.replace(col_name, filled)?;

                processing_steps.push(format!(
                    "Filled {} missing values in '{}' with mode: {}",
                    missing, col_name, mode_val
                ));
            }
        }

        Ok(())
    }

    /// Remove every row that has a missing cell in any column.
    pub fn drop_incomplete_rows(
        df: &mut DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let before = df.height();
        let mut keep = vec![true; before];

        for col in df.get_columns() {
            if col.null_count() == 0 {
                continue;
            }
            for (row, is_null) in col.is_null().into_iter().enumerate() {
                if is_null.unwrap_or(false) {
                    keep[row] = false;
                }
            }
        }

        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        *df = df.filter(&mask)?;

        let removed = before - df.height();
        processing_steps.push(format!(
            "Dropped {} rows containing missing values",
            removed
        ));
        debug!("Dropped {} incomplete rows", removed);

        Ok(())
    }

    /// Fill numeric column with a specific value.
    fn fill_with_value(
        df: &mut DataFrame,
        series: &Series,
        fill_value: f64,
        processing_steps: &mut Vec<String>,
        method: &str,
    ) -> Result<()> {
        let missing = series.null_count();
        let result = fill_numeric_nulls(series, fill_value)?;
        df.replace(series.name().as_str(), result)?;

        processing_steps.push(format!(
            "Filled {} missing values in '{}' with {}: {:.2}",
            missing,
            series.name(),
            method,
            fill_value
        ));

        Ok(())
    }
}
