//! Insurance Claim A/B Runner
//!
//! Generates the synthetic claim table, saves it as CSV, runs the province
//! chi-squared test and the gender Welch t-test, and prints the results.
//!
//! Usage:
//!   insurance_ab                                   # fixed run: 1000 records, seed 42
//!   insurance_ab --records 5000 --seed 7 --format json
//!   insurance_ab --skip-save
//!   insurance_ab convert ./claims.txt --name insurance_text_data.csv
//!
//! Environment:
//!   INSURANCE_AB_RECORDS - Number of records (default: 1000)
//!   INSURANCE_AB_SEED - Generator seed (default: 42)
//!   INSURANCE_AB_DATA_DIR - Output directory (default: <parent-of-cwd>/data)
//!   RUST_LOG - Log filter (default: insurance_ab=info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use insurance_ab::ab_test::{render_json, render_text, DEFAULT_NUM_RECORDS, DEFAULT_SEED};
use insurance_ab::config::{default_data_dir, PipelineConfig, DEFAULT_OUTPUT_FILE};
use insurance_ab::pipeline::{convert_source, run_pipeline};

#[derive(Parser, Debug)]
#[command(name = "insurance_ab")]
#[command(about = "Synthetic insurance claims with chi-squared and Welch t-tests")]
struct Cli {
    /// Number of records to generate
    #[arg(long, env = "INSURANCE_AB_RECORDS", default_value_t = DEFAULT_NUM_RECORDS)]
    records: usize,

    /// Generator seed
    #[arg(long, env = "INSURANCE_AB_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output directory (default: <parent-of-cwd>/data)
    #[arg(long, env = "INSURANCE_AB_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// File name for the generated table
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Do not write the generated table to disk
    #[arg(long)]
    skip_save: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a pipe-delimited text file to CSV in the output directory
    Convert {
        /// Pipe-delimited source file
        source: PathBuf,

        /// Output file name (default: insurance_text_data.csv)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir().context("Failed to resolve working directory")?,
    };

    let mut config = PipelineConfig::new(data_dir);

    if let Some(Commands::Convert { source, name }) = cli.command {
        if let Some(name) = name {
            config.converted_file = name;
        }
        let path = convert_source(&config, &source)
            .with_context(|| format!("Failed to convert {}", source.display()))?;
        println!("Data saved to {}", path.display());
        return Ok(());
    }

    config.generator = config
        .generator
        .with_records(cli.records)
        .with_seed(cli.seed);
    config.output_file = cli.output_file;

    let run = run_pipeline(&config, !cli.skip_save).context("Claim A/B pipeline failed")?;
    if let Some(path) = &run.saved_to {
        info!(path = %path.display(), "Generated data written");
    }

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&run.report)),
        OutputFormat::Json => println!(
            "{}",
            render_json(&run.report).context("Failed to serialize report")?
        ),
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("insurance_ab=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
