//! Imputation module for handling missing values.
//!
//! [`MissingValueHandler`] dispatches on a [`MissingValueStrategy`] and
//! [`StatisticalImputer`] does the per-column mean, median and mode fills.

mod statistical;

pub use statistical::StatisticalImputer;

use crate::config::MissingValueStrategy;
use crate::error::Result;
use crate::utils::{count_missing, get_dtype_category, DtypeCategory};
use polars::prelude::*;
use tracing::{debug, info};

/// Applies a missing-value strategy to a whole dataset.
pub struct MissingValueHandler;

impl MissingValueHandler {
    /// Handle missing values using the given strategy.
    ///
    /// `Mean` and `Median` fill numeric columns only. `Mode` also fills
    /// string and Boolean columns; temporal columns keep their gaps.
    /// `Drop` removes every row holding a missing cell.
    pub fn handle(
        df: &mut DataFrame,
        strategy: MissingValueStrategy,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let missing = count_missing(df);
        if missing == 0 {
            debug!("No missing values to handle");
            return Ok(());
        }

        info!("Handling {} missing values with strategy '{}'", missing, strategy);

        if strategy == MissingValueStrategy::Drop {
            return StatisticalImputer::drop_incomplete_rows(df, processing_steps);
        }

        let columns_with_missing: Vec<(String, DtypeCategory)> = df
            .get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| (col.name().to_string(), get_dtype_category(col.dtype())))
            .collect();

        for (col_name, category) in &columns_with_missing {
            match (strategy, category) {
                (MissingValueStrategy::Mean, DtypeCategory::Numeric) => {
                    StatisticalImputer::apply_numeric_mean(df, col_name, processing_steps)?
                }
                (MissingValueStrategy::Median, DtypeCategory::Numeric) => {
                    StatisticalImputer::apply_numeric_median(df, col_name, processing_steps)?
                }
                (MissingValueStrategy::Mode, DtypeCategory::Numeric) => {
                    StatisticalImputer::apply_numeric_mode(df, col_name, processing_steps)?
                }
                (MissingValueStrategy::Mode, DtypeCategory::String) => {
                    StatisticalImputer::apply_string_mode(df, col_name, processing_steps)?
                }
                (MissingValueStrategy::Mode, DtypeCategory::Boolean) => {
                    StatisticalImputer::apply_boolean_mode(df, col_name, processing_steps)?
                }
                _ => {
                    debug!(
                        "Leaving missing values in '{}' ({:?}) untouched under '{}'",
                        col_name, category, strategy
                    );
                }
            }
        }

        Ok(())
    }

    /// Parse a strategy selector and apply it.
    ///
    /// Fails with [`crate::CleaningError::InvalidStrategy`] for anything other
    /// than `mean`, `median`, `mode` or `drop`.
    pub fn handle_str(
        df: &mut DataFrame,
        strategy: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let strategy: MissingValueStrategy = strategy.parse()?;
        Self::handle(df, strategy, processing_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name)
            .unwrap()
            .cast(&DataType::Float64)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_handle_mean_fills_with_original_mean() {
        let mut df = df![
            "a" => [Some(1.0), None, Some(2.0), Some(6.0), None],
            "b" => [Some(10i64), Some(20), None, Some(30), Some(40)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        MissingValueHandler::handle(&mut df, MissingValueStrategy::Mean, &mut steps).unwrap();

        assert_eq!(
            f64_values(&df, "a"),
            vec![Some(1.0), Some(3.0), Some(2.0), Some(6.0), Some(3.0)]
        );
        assert_eq!(f64_values(&df, "b")[2], Some(25.0));
        assert_eq!(count_missing(&df), 0);
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_handle_mean_leaves_strings_missing() {
        let mut df = df![
            "a" => [Some(1.0), None],
            "name" => [None, Some("x")],
        ]
        .unwrap();
        let mut steps = Vec::new();

        MissingValueHandler::handle(&mut df, MissingValueStrategy::Mean, &mut steps).unwrap();

        assert_eq!(df.column("a").unwrap().null_count(), 0);
        assert_eq!(df.column("name").unwrap().null_count(), 1);
    }

    #[test]
    fn test_handle_median() {
        let mut df = df![
            "a" => [Some(1.0), Some(100.0), Some(3.0), None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        MissingValueHandler::handle(&mut df, MissingValueStrategy::Median, &mut steps).unwrap();

        assert_eq!(f64_values(&df, "a")[3], Some(3.0));
    }

    #[test]
    fn test_handle_mode_fills_numeric_and_string() {
        let mut df = df![
            "a" => [Some(5.0), Some(7.0), Some(5.0), None],
            "city" => [Some("Oslo"), None, Some("Lima"), Some("Oslo")],
        ]
        .unwrap();
        let mut steps = Vec::new();

        MissingValueHandler::handle(&mut df, MissingValueStrategy::Mode, &mut steps).unwrap();

        assert_eq!(f64_values(&df, "a")[3], Some(5.0));
        let city: Vec<Option<&str>> = df.column("city").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(city[1], Some("Oslo"));
    }

    #[test]
    fn test_handle_mode_fills_boolean() {
        let mut df = df![
            "flag" => [Some(true), None, Some(true), Some(false)],
            "a" => [1.0, 2.0, 3.0, 4.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        MissingValueHandler::handle(&mut df, MissingValueStrategy::Mode, &mut steps).unwrap();

        let flag = df.column("flag").unwrap();
        assert_eq!(flag.dtype(), &DataType::Boolean);
        let values: Vec<Option<bool>> = flag.bool().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(true), Some(true), Some(true), Some(false)]);
        assert_eq!(count_missing(&df), 0);
    }

    #[test]
    fn test_handle_drop_removes_incomplete_rows() {
        let mut df = df![
            "a" => [Some(1.0), None, Some(3.0), Some(4.0)],
            "name" => [Some("w"), Some("x"), None, Some("z")],
        ]
        .unwrap();
        let before = df.height();
        let mut steps = Vec::new();

        MissingValueHandler::handle(&mut df, MissingValueStrategy::Drop, &mut steps).unwrap();

        assert_eq!(count_missing(&df), 0);
        assert!(df.height() <= before);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_handle_str_rejects_bogus() {
        let mut df = df![
            "a" => [Some(1.0), None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let err = MissingValueHandler::handle_str(&mut df, "bogus", &mut steps).unwrap_err();

        assert!(err.is_invalid_strategy());
        // Nothing was touched
        assert_eq!(df.column("a").unwrap().null_count(), 1);
    }

    #[test]
    fn test_handle_no_missing_is_noop() {
        let mut df = df![
            "a" => [1i64, 2, 3],
        ]
        .unwrap();
        let mut steps = Vec::new();

        MissingValueHandler::handle(&mut df, MissingValueStrategy::Mean, &mut steps).unwrap();

        // Integer column keeps its dtype when nothing needs filling
        assert_eq!(df.column("a").unwrap().dtype(), &DataType::Int64);
        assert!(steps.is_empty());
    }
}
