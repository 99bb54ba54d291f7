//! Report generation module.
//!
//! Writes cleaned datasets as CSV and run reports as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use datascrub::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report("data/train.csv", &result, &config);
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to file
//! ReportGenerator::write_report_to_file(&report, "output", "train")?;
//! ```

mod generator;

pub use generator::{CleaningReport, ReportGenerator};
