//! CLI entry point for the cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use datascrub::{
    CleaningConfig, CleaningConfigBuilder, CleaningReport, ConstantColumnPolicy,
    MissingValueStrategy, OutlierStrategy, Pipeline, ReportGenerator,
};
use dotenv::dotenv;
use std::io::{self, Write};
use std::path::Path;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a tabular dataset",
    long_about = "Removes duplicate rows, handles missing values, treats z-score outliers \
                  and min-max normalizes numeric columns, then writes the result as CSV.\n\n\
                  Any of the input path, missing value method, outlier threshold or outlier \
                  method that is not given on the command line or in --config is prompted for.\n\n\
                  EXAMPLES:\n  \
                  # Fully interactive\n  \
                  datascrub\n\n  \
                  # Non-interactive\n  \
                  datascrub -i data.csv -m median -t 3 -s replace_mean -o out/clean.csv\n\n  \
                  # Machine-readable report\n  \
                  datascrub -i data.csv -m drop -t 2 -s remove --json"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: Option<String>,

    /// Missing value handling method (mean, median, mode, drop)
    #[arg(short = 'm', long)]
    missing: Option<String>,

    /// Outlier threshold in standard deviations
    #[arg(short = 't', long)]
    threshold: Option<i64>,

    /// Outlier handling method (remove, replace_mean, replace_median)
    #[arg(short = 's', long)]
    outlier_strategy: Option<String>,

    /// Where to write the cleaned CSV
    #[arg(short, long)]
    output: Option<String>,

    /// JSON file with a cleaning configuration
    ///
    /// Command-line flags override values from the file.
    #[arg(long)]
    config: Option<String>,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report next to the output file
    ///
    /// The report will be saved as <output_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Keep duplicate rows
    #[arg(long)]
    keep_duplicates: bool,

    /// Normalized value for constant numeric columns (zero, nan)
    #[arg(long)]
    constant_columns: Option<String>,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Print `message` and read one trimmed line from stdin.
///
/// In JSON mode the prompt goes to stderr so stdout only carries the report.
fn prompt(message: &str, json_output: bool) -> Result<String> {
    if json_output {
        eprint!("{}", message);
        io::stderr().flush()?;
    } else {
        print!("{}", message);
        io::stdout().flush()?;
    }

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    dotenv().ok();

    let file_config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            Some(CleaningConfig::from_json_file(path)?)
        }
        None => None,
    };

    let input = match &args.input {
        Some(input) => input.clone(),
        None => prompt("Enter dataset file path: ", args.json)?,
    };

    let config = resolve_config(&args, file_config.as_ref())?;
    let pipeline = build_pipeline(&args, config.clone())?;

    info!("{}", "=".repeat(80));
    info!("Starting data cleaning pipeline...");
    info!("{}", "=".repeat(80));

    let result = match pipeline.run(&input) {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!("Pipeline failed: {}", e));
        }
    };

    let report = ReportGenerator::build_report(&input, &result, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let (dir, stem) = report_location(&config.output_path);
        let report_path = ReportGenerator::write_report_to_file(&report, dir, &stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&report);

    Ok(())
}

/// Layer the config file, command-line flags and prompts into one config.
fn resolve_config(args: &Args, file_config: Option<&CleaningConfig>) -> Result<CleaningConfig> {
    let mut builder = match file_config {
        Some(config) => CleaningConfigBuilder::from_config(config),
        None => CleaningConfig::builder(),
    };
    let prompt_unset = file_config.is_none();

    let missing = match (&args.missing, prompt_unset) {
        (Some(method), _) => Some(method.clone()),
        (None, true) => Some(prompt(
            "Choose missing value handling method (mean/median/mode/drop): ",
            args.json,
        )?),
        (None, false) => None,
    };
    if let Some(method) = missing {
        builder = builder.missing_strategy(method.parse::<MissingValueStrategy>()?);
    }

    let threshold = match (args.threshold, prompt_unset) {
        (Some(threshold), _) => Some(threshold),
        (None, true) => {
            let raw = prompt(
                "Enter outlier threshold (e.g., 3 for 3 standard deviations): ",
                args.json,
            )?;
            Some(
                raw.parse::<i64>()
                    .map_err(|e| anyhow!("Invalid outlier threshold '{}': {}", raw, e))?,
            )
        }
        (None, false) => None,
    };
    if let Some(threshold) = threshold {
        builder = builder.outlier_threshold(threshold as f64);
    }

    let outlier = match (&args.outlier_strategy, prompt_unset) {
        (Some(method), _) => Some(method.clone()),
        (None, true) => Some(prompt(
            "Choose outlier handling method (remove/replace_mean/replace_median): ",
            args.json,
        )?),
        (None, false) => None,
    };
    if let Some(method) = outlier {
        builder = builder.outlier_strategy(OutlierStrategy::from(method.as_str()));
    }

    if let Some(ref output) = args.output {
        builder = builder.output_path(output);
    }

    if args.keep_duplicates {
        builder = builder.remove_duplicates(false);
    }

    if let Some(ref policy) = args.constant_columns {
        builder = builder.constant_column(policy.parse::<ConstantColumnPolicy>()?);
    }

    Ok(builder.build()?)
}

fn build_pipeline(args: &Args, config: CleaningConfig) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().config(config);

    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Directory and file stem for the report written next to `output_path`.
fn report_location(output_path: &Path) -> (&Path, String) {
    let dir = output_path.parent().unwrap_or_else(|| Path::new(""));
    let stem = output_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string();
    (dir, stem)
}

/// Print a human-readable summary of the cleaning results.
fn print_human_readable_summary(report: &CleaningReport) {
    let summary = &report.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        report.input_file, summary.rows_before, summary.columns
    );
    if let Some(ref output_file) = report.output_file {
        println!(
            "Output: {} ({} rows x {} columns)",
            output_file, summary.rows_after, summary.columns
        );
    }
    println!();

    println!("Settings:");
    println!("  Missing values: {}", report.missing_strategy);
    println!(
        "  Outliers: {} (|z| > {})",
        report.outlier_strategy, report.outlier_threshold
    );
    println!("  Constant columns: {}", report.constant_column);
    println!();

    println!("Processing Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed, {:.1}%)",
        summary.rows_before,
        summary.rows_after,
        summary.rows_removed,
        summary.rows_removed_percentage()
    );
    println!("  Duplicates removed: {}", summary.duplicates_removed);
    println!(
        "  Missing cells: {} -> {}",
        summary.missing_before, summary.missing_after
    );
    println!("  Outlier rows flagged: {}", summary.outliers_flagged);
    println!("  Normalized columns: {}", summary.normalized_columns.join(", "));
    println!();

    if !report.processing_steps.is_empty() {
        println!("Actions Taken:");
        for step in &report.processing_steps {
            println!("  - {}", step);
        }
        println!();
    }

    if !summary.warnings.is_empty() {
        println!("Warnings:");
        for warning in &summary.warnings {
            println!("  ! {}", warning);
        }
        println!();
    }

    if let Some(ref output_file) = report.output_file {
        println!("Data cleaning complete. Cleaned data saved to {}", output_file);
    }
    println!("{}", "=".repeat(80));
}
