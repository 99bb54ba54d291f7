//! Duplicate row handling.
//!
//! Exact duplicates are collapsed to their first occurrence. Two missing
//! cells compare equal, so rows that only differ in where they are not
//! missing are still told apart.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Data cleaner for duplicate detection and removal.
pub struct DataCleaner;

impl DataCleaner {
    /// Number of rows that repeat an earlier row exactly.
    pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
        if df.width() == 0 {
            return Ok(0);
        }
        let unique = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - unique.height())
    }

    /// Collapse exact duplicate rows, keeping first occurrences in order.
    ///
    /// Returns the deduplicated frame and the number of rows removed.
    pub fn remove_duplicates(df: &DataFrame) -> Result<(DataFrame, usize)> {
        if df.width() == 0 {
            return Ok((df.clone(), 0));
        }

        let before = df.height();
        let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - deduped.height();

        if removed > 0 {
            debug!("Removed {} duplicate rows", removed);
        } else {
            debug!("No duplicate rows found");
        }

        Ok((deduped, removed))
    }
}
