//! Shared utilities for the cleaning pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for cleaning purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
///
/// Booleans are not numeric here: they are never imputed with an aggregate,
/// scored for outliers or rescaled.
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Names of the numeric columns of a DataFrame, in column order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Non-missing values of a numeric Series as `f64`.
pub fn non_null_f64(series: &Series) -> PolarsResult<Vec<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().flatten().collect())
}

/// Population standard deviation (ddof = 0) over the non-missing values.
pub fn population_std(series: &Series) -> PolarsResult<Option<f64>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.std(0))
}

/// First value of the longest run in a sorted slice.
///
/// With ties the earliest run wins, so on ascending input this is the
/// smallest of the most frequent values.
fn first_longest_run<T: PartialEq + Clone>(sorted: &[T]) -> Option<T> {
    let mut best: Option<(&T, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        let run = j - i;
        if best.is_none_or(|(_, len)| run > len) {
            best = Some((&sorted[i], run));
        }
        i = j;
    }
    best.map(|(value, _)| value.clone())
}

/// Most frequent non-missing value of a numeric Series.
///
/// Ties resolve to the smallest value. Returns `None` when every value is missing.
pub fn numeric_mode(series: &Series) -> PolarsResult<Option<f64>> {
    let mut values = non_null_f64(series)?;
    values.sort_by(|a, b| a.total_cmp(b));
    Ok(first_longest_run(&values))
}

/// Most frequent non-missing value of a string Series.
///
/// Ties resolve to the lexicographically smallest value.
pub fn string_mode(series: &Series) -> Option<String> {
    let str_chunked = series.str().ok()?;
    let mut values: Vec<&str> = str_chunked.into_iter().flatten().collect();
    values.sort_unstable();
    first_longest_run(&values).map(str::to_string)
}

/// Most frequent non-missing value of a Boolean Series.
///
/// A tie resolves to `false`.
pub fn boolean_mode(series: &Series) -> Option<bool> {
    let bools = series.bool().ok()?;
    let trues = bools.into_iter().filter(|v| *v == Some(true)).count();
    let falses = bools.into_iter().filter(|v| *v == Some(false)).count();
    match (trues, falses) {
        (0, 0) => None,
        (t, f) => Some(t > f),
    }
}

/// Total number of missing cells in a DataFrame.
pub fn count_missing(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always Float64.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let result_vec: Vec<Option<f64>> = float_series
        .f64()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a Boolean Series with a specific value.
pub fn fill_boolean_nulls(series: &Series, fill_value: bool) -> PolarsResult<Series> {
    let result_vec: Vec<Option<bool>> = series
        .bool()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let result_vec: Vec<Option<String>> = series
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value).to_string()))
        .collect();

    Ok(Series::new(series.name().clone(), result_vec))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(get_dtype_category(&DataType::Boolean), DtypeCategory::Boolean);
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
    }

    #[test]
    fn test_numeric_column_names_preserves_order() {
        let df = df![
            "b" => [1.0, 2.0],
            "name" => ["x", "y"],
            "a" => [3i64, 4],
        ]
        .unwrap();
        assert_eq!(numeric_column_names(&df), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_population_std() {
        // Population std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let series = Series::new("v".into(), &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let std = population_std(&series).unwrap().unwrap();
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_mode_ties_pick_smallest() {
        let series = Series::new("v".into(), &[Some(3.0), Some(1.0), None, Some(3.0), Some(1.0)]);
        assert_eq!(numeric_mode(&series).unwrap(), Some(1.0));
    }

    #[test]
    fn test_numeric_mode_all_null() {
        let series = Series::new("v".into(), &[Option::<f64>::None, None]);
        assert_eq!(numeric_mode(&series).unwrap(), None);
    }

    #[test]
    fn test_string_mode() {
        let series = Series::new("test".into(), &["a", "b", "a", "c", "a"]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_tie_breaking() {
        let series = Series::new("test".into(), &[Some("b"), Some("a"), None]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_boolean_mode() {
        let series = Series::new("flag".into(), &[Some(true), None, Some(true), Some(false)]);
        assert_eq!(boolean_mode(&series), Some(true));

        let tied = Series::new("flag".into(), &[Some(true), Some(false), None]);
        assert_eq!(boolean_mode(&tied), Some(false));

        let empty = Series::new("flag".into(), &[Option::<bool>::None]);
        assert_eq!(boolean_mode(&empty), None);
    }

    #[test]
    fn test_fill_boolean_nulls() {
        let series = Series::new("flag".into(), &[Some(false), None]);
        let filled = fill_boolean_nulls(&series, true).unwrap();
        let values: Vec<Option<bool>> = filled.bool().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(false), Some(true)]);
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("test".into(), &[Some(1i64), None, Some(3)]);
        let filled = fill_numeric_nulls(&series, 0.5).unwrap();

        assert_eq!(filled.dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = filled.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1.0), Some(0.5), Some(3.0)]);
    }

    #[test]
    fn test_fill_string_nulls_keeps_values_unquoted() {
        let series = Series::new("test".into(), &[Some("a"), None]);
        let filled = fill_string_nulls(&series, "z").unwrap();
        let values: Vec<Option<&str>> = filled.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("a"), Some("z")]);
    }

    #[test]
    fn test_count_missing() {
        let df = df![
            "a" => [Some(1.0), None, None],
            "b" => [Some("x"), None, Some("z")],
        ]
        .unwrap();
        assert_eq!(count_missing(&df), 3);
    }
}
