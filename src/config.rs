//! Pipeline configuration
//!
//! Defaults reproduce the fixed run: 1000 records, seed 42, output under
//! `<parent-of-cwd>/data`. The binary may override them from flags or
//! `INSURANCE_AB_*` environment variables.

use crate::ab_test::generator::GeneratorConfig;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "insurance_data.csv";
pub const DEFAULT_CONVERTED_FILE: &str = "insurance_text_data.csv";
pub const DATA_DIR_NAME: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub generator: GeneratorConfig,
    /// Directory all output files are written to.
    pub data_dir: PathBuf,
    pub output_file: String,
    /// File name used by the pipe-delimited converter.
    pub converted_file: String,
}

impl PipelineConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            generator: GeneratorConfig::default(),
            data_dir: data_dir.into(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            converted_file: DEFAULT_CONVERTED_FILE.to_string(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_file)
    }

    pub fn converted_path(&self) -> PathBuf {
        self.data_dir.join(&self.converted_file)
    }
}

/// `data` next to `working_dir`, i.e. `<working_dir>/../data` normalized.
pub fn data_dir_beside(working_dir: &Path) -> PathBuf {
    match working_dir.parent() {
        Some(parent) => parent.join(DATA_DIR_NAME),
        None => working_dir.join(DATA_DIR_NAME),
    }
}

/// Default output directory, resolved once from the process working directory.
pub fn default_data_dir() -> io::Result<PathBuf> {
    Ok(data_dir_beside(&std::env::current_dir()?))
}
