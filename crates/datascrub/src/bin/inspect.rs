//! Load a dataset and print a first-look report.

use anyhow::Result;
use clap::Parser;
use datascrub::DatasetLoader;
use datascrub::loader::DEFAULT_HEAD_ROWS;
use dotenv::dotenv;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Inspect a tabular dataset",
    long_about = "Prints the shape and column types of a CSV file, its first rows, \
                  missing values per column and the number of duplicate rows.\n\n\
                  If PATH is omitted it is prompted for."
)]
struct Args {
    /// Path to the CSV file to inspect
    path: Option<String>,

    /// Number of rows to preview
    #[arg(short = 'n', long, default_value_t = DEFAULT_HEAD_ROWS)]
    rows: usize,

    /// Print the dataset summary as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.json);

    dotenv().ok();

    let path = match args.path {
        Some(path) => path,
        None => {
            print!("Enter dataset file path: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            line.trim().to_string()
        }
    };

    let df = DatasetLoader::load(&path)?;
    let summary = DatasetLoader::summarize(&df)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "=".repeat(80));
    println!("BASIC INFO");
    println!("{}", "=".repeat(80));
    println!("  File: {}", path);
    println!("  Rows: {}", summary.rows);
    println!("  Columns: {}", summary.columns);
    println!();
    println!("{:<30} {:<12} {:<10}", "Column", "Type", "Non-Null");
    println!("{}", "-".repeat(54));
    for col in &summary.column_summaries {
        println!(
            "{:<30} {:<12} {:<10}",
            col.name,
            col.dtype,
            summary.rows - col.null_count
        );
    }
    println!();

    println!("FIRST {} ROWS", args.rows);
    println!("{}", "-".repeat(40));
    println!("{}", DatasetLoader::head(&df, args.rows));
    println!();

    println!("MISSING VALUES IN EACH COLUMN");
    println!("{}", "-".repeat(40));
    for col in &summary.column_summaries {
        println!("  {:<30} {}", col.name, col.null_count);
    }
    println!();

    println!("NUMBER OF DUPLICATE ROWS: {}", summary.duplicate_count);
    println!("{}", "=".repeat(80));

    Ok(())
}
