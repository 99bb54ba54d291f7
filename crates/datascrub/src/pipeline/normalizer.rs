//! Min-max normalization of numeric columns.

use crate::config::ConstantColumnPolicy;
use crate::error::Result;
use crate::utils::numeric_column_names;
use polars::prelude::*;
use tracing::{debug, warn};

/// Rescales numeric columns to `[0, 1]`.
pub struct Normalizer;

impl Normalizer {
    /// Apply `(x - min) / (max - min)` to every numeric column.
    ///
    /// Missing cells stay missing and non-numeric columns are untouched. A
    /// column whose values are all equal is filled according to `policy`.
    /// Returns the names of the columns that were rescaled.
    pub fn min_max(
        df: &mut DataFrame,
        policy: ConstantColumnPolicy,
        processing_steps: &mut Vec<String>,
    ) -> Result<Vec<String>> {
        let mut normalized = Vec::new();

        for col_name in numeric_column_names(df) {
            let float_series = df
                .column(&col_name)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            let values = float_series.f64()?;

            let (Some(min), Some(max)) = (values.min(), values.max()) else {
                debug!("Skipping normalization of '{}': no values", col_name);
                continue;
            };
            let range = max - min;

            let scaled: Float64Chunked = if range == 0.0 {
                let fill = match policy {
                    ConstantColumnPolicy::Zero => 0.0,
                    ConstantColumnPolicy::Nan => f64::NAN,
                };
                warn!("Column '{}' is constant; filling with {}", col_name, fill);
                processing_steps.push(format!(
                    "Column '{}' is constant ({}); normalized to {}",
                    col_name, min, fill
                ));
                values.apply_values(|_| fill)
            } else {
                processing_steps.push(format!(
                    "Normalized '{}' to [0, 1] (min: {:.2}, max: {:.2})",
                    col_name, min, max
                ));
                values.apply_values(|x| (x - min) / range)
            };

            df.replace(&col_name, scaled.with_name(col_name.as_str().into()).into_series())?;
            normalized.push(col_name);
        }

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_min_max_maps_extremes() {
        let mut df = df![
            "a" => [2i64, 4, 6, 10],
        ]
        .unwrap();
        let mut steps = vec![];

        let cols = Normalizer::min_max(&mut df, ConstantColumnPolicy::Zero, &mut steps).unwrap();

        assert_eq!(cols, vec!["a".to_string()]);
        assert_eq!(
            f64_values(&df, "a"),
            vec![Some(0.0), Some(0.25), Some(0.5), Some(1.0)]
        );
    }

    #[test]
    fn test_min_max_values_in_unit_interval() {
        let mut df = df![
            "a" => [-3.5, 17.25, 0.0, 9.0, -1.0],
            "b" => [1000.0, 1.0, 2.0, 3.0, 4.0],
        ]
        .unwrap();
        let mut steps = vec![];

        Normalizer::min_max(&mut df, ConstantColumnPolicy::Zero, &mut steps).unwrap();

        for name in ["a", "b"] {
            let values: Vec<f64> = f64_values(&df, name).into_iter().flatten().collect();
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
            assert!(values.contains(&0.0));
            assert!(values.contains(&1.0));
        }
    }

    #[test]
    fn test_min_max_preserves_missing_and_strings() {
        let mut df = df![
            "a" => [Some(0.0), None, Some(5.0)],
            "name" => ["x", "y", "z"],
        ]
        .unwrap();
        let mut steps = vec![];

        let cols = Normalizer::min_max(&mut df, ConstantColumnPolicy::Zero, &mut steps).unwrap();

        assert_eq!(cols.len(), 1);
        assert_eq!(f64_values(&df, "a"), vec![Some(0.0), None, Some(1.0)]);
        assert_eq!(df.column("name").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_min_max_constant_column_zero() {
        let mut df = df![
            "c" => [7.0, 7.0, 7.0],
        ]
        .unwrap();
        let mut steps = vec![];

        Normalizer::min_max(&mut df, ConstantColumnPolicy::Zero, &mut steps).unwrap();

        assert_eq!(f64_values(&df, "c"), vec![Some(0.0); 3]);
        assert!(steps[0].contains("constant"));
    }

    #[test]
    fn test_min_max_constant_column_nan() {
        let mut df = df![
            "c" => [7.0, 7.0],
        ]
        .unwrap();
        let mut steps = vec![];

        Normalizer::min_max(&mut df, ConstantColumnPolicy::Nan, &mut steps).unwrap();

        assert!(f64_values(&df, "c").iter().all(|v| v.is_some_and(f64::is_nan)));
    }

    #[test]
    fn test_min_max_all_missing_column_skipped() {
        let mut df = df![
            "a" => [Option::<f64>::None, None],
        ]
        .unwrap();
        let mut steps = vec![];

        let cols = Normalizer::min_max(&mut df, ConstantColumnPolicy::Zero, &mut steps).unwrap();

        assert!(cols.is_empty());
        assert!(steps.is_empty());
    }
}
