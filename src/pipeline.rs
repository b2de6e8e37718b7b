//! Pipeline Runner
//!
//! Generate → (optionally) save → analyze. Persistence is off the critical
//! path of the tests: both tests read the in-memory table.

use crate::ab_test::analysis::{analyze, AnalysisReport};
use crate::ab_test::generator::generate_claims;
use crate::config::PipelineConfig;
use crate::models::ClaimTable;
use crate::persistence::{convert_pipe_delimited, save_table, PersistenceError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Artifacts of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub table: ClaimTable,
    /// Where the table was written, if saving was requested.
    pub saved_to: Option<PathBuf>,
    pub report: AnalysisReport,
}

pub fn run_pipeline(config: &PipelineConfig, save: bool) -> Result<PipelineRun, PersistenceError> {
    info!(
        records = config.generator.num_records,
        seed = config.generator.seed,
        "Starting claim A/B pipeline"
    );
    let table = generate_claims(&config.generator);

    let saved_to = if save {
        Some(save_table(&table, &config.data_dir, &config.output_file)?)
    } else {
        None
    };

    let report = analyze(&table);
    Ok(PipelineRun {
        table,
        saved_to,
        report,
    })
}

/// Transcode a pipe-delimited `source` into `data_dir/converted_file`.
pub fn convert_source(config: &PipelineConfig, source: &Path) -> Result<PathBuf, PersistenceError> {
    convert_pipe_delimited(source, &config.data_dir, &config.converted_file)
}
