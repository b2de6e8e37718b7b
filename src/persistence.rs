//! Delimited Text Persistence
//!
//! Writes claim tables as comma-separated text and transcodes externally
//! supplied pipe-delimited files into the same output directory.
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//!   insurance_data.csv        -- Province,Gender,Claimed + one row per record
//!   insurance_text_data.csv   -- transcoded pipe-delimited input
//! ```
//!
//! Every function takes the output directory explicitly; nothing here reads
//! the current working directory.

use crate::models::{ClaimRecord, ClaimTable};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CLAIMS_HEADER: [&str; 3] = ["Province", "Gender", "Claimed"];
pub const PIPE_DELIMITER: u8 = b'|';
pub const COMMA_DELIMITER: u8 = b',';

/// Header plus rows of an arbitrary delimited file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimitedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DelimitedTable {
    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistenceError> {
    fs::create_dir_all(dir).map_err(|source| PersistenceError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `table` to `dir/file_name`, creating `dir` if needed.
///
/// The header row is written even for an empty table.
pub fn save_table(
    table: &ClaimTable,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, PersistenceError> {
    ensure_dir(dir)?;
    let path = dir.join(file_name);
    let file = File::create(&path).map_err(|source| PersistenceError::Io {
        path: path.clone(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    writer
        .write_record(CLAIMS_HEADER)
        .map_err(|e| PersistenceError::from_csv(&path, e))?;
    for record in table {
        writer
            .serialize(record)
            .map_err(|e| PersistenceError::from_csv(&path, e))?;
    }
    writer.flush().map_err(|source| PersistenceError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), records = table.len(), "Saved claim table");
    Ok(path)
}

/// Read a file written by [`save_table`].
pub fn load_table(path: &Path) -> Result<ClaimTable, PersistenceError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let records = reader
        .deserialize::<ClaimRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PersistenceError::from_csv(path, e))?;

    debug!(path = %path.display(), records = records.len(), "Loaded claim table");
    Ok(ClaimTable::new(records))
}

/// Read a delimited file with a header row.
///
/// Every row must have as many fields as the header.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<DelimitedTable, PersistenceError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PersistenceError::from_csv(path, e))?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| PersistenceError::from_csv(path, e))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(DelimitedTable { headers, rows })
}

/// Write `table` to `path` with `delimiter`. The parent directory must exist.
pub fn write_delimited(
    table: &DelimitedTable,
    path: &Path,
    delimiter: u8,
) -> Result<(), PersistenceError> {
    let file = File::create(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(BufWriter::new(file));

    writer
        .write_record(&table.headers)
        .map_err(|e| PersistenceError::from_csv(path, e))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| PersistenceError::from_csv(path, e))?;
    }
    writer.flush().map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a pipe-delimited file and re-save it as CSV in `dir/file_name`.
///
/// Headers, rows and values are carried over unchanged; only the delimiter
/// differs.
pub fn convert_pipe_delimited(
    source: &Path,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, PersistenceError> {
    let table = read_delimited(source, PIPE_DELIMITER)?;
    ensure_dir(dir)?;
    let path = dir.join(file_name);
    write_delimited(&table, &path, COMMA_DELIMITER)?;

    info!(
        source = %source.display(),
        path = %path.display(),
        rows = table.n_rows(),
        cols = table.n_cols(),
        "Converted pipe-delimited file to CSV"
    );
    Ok(path)
}

fn open(path: &Path) -> Result<File, PersistenceError> {
    File::open(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// ERRORS
// =============================================================================

/// Persistence errors.
#[derive(Debug)]
pub enum PersistenceError {
    /// Directory creation, open, create or flush failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Row has a different field count than the header.
    Shape {
        path: PathBuf,
        line: Option<u64>,
        expected: u64,
        found: u64,
    },
    /// Malformed field or (de)serialization failure.
    Csv { path: PathBuf, source: csv::Error },
}

impl PersistenceError {
    fn from_csv(path: &Path, err: csv::Error) -> Self {
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = err.kind()
        {
            return Self::Shape {
                path: path.to_path_buf(),
                line: pos.as_ref().map(|p| p.line()),
                expected: *expected_len,
                found: *len,
            };
        }
        Self::Csv {
            path: path.to_path_buf(),
            source: err,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Shape { path, .. } | Self::Csv { path, .. } => path,
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error at {}: {}", path.display(), source),
            Self::Shape {
                path,
                line: Some(line),
                expected,
                found,
            } => write!(
                f,
                "inconsistent column count in {} at line {}: expected {}, found {}",
                path.display(),
                line,
                expected,
                found
            ),
            Self::Shape {
                path,
                line: None,
                expected,
                found,
            } => write!(
                f,
                "inconsistent column count in {}: expected {}, found {}",
                path.display(),
                expected,
                found
            ),
            Self::Csv { path, source } => {
                write!(f, "delimited text error in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Shape { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Province};
    use std::io::ErrorKind;

    fn sample_table() -> ClaimTable {
        ClaimTable::new(vec![
            ClaimRecord {
                province: Province::B,
                gender: Gender::Female,
                claimed: false,
            },
            ClaimRecord {
                province: Province::A,
                gender: Gender::Male,
                claimed: true,
            },
        ])
    }

    #[test]
    fn test_save_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_table(&sample_table(), dir.path(), "claims.csv").unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(
            text,
            "Province,Gender,Claimed\nProvince_B,Female,0\nProvince_A,Male,1\n"
        );
    }

    #[test]
    fn test_save_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("data");
        let path = save_table(&sample_table(), &nested, "claims.csv").unwrap();
        assert!(path.exists());
        assert_eq!(path.parent().unwrap(), nested.as_path());
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_table(&ClaimTable::default(), dir.path(), "empty.csv").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Province,Gender,Claimed\n");
        assert!(load_table(&path).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_table(&sample_table(), dir.path(), "claims.csv").unwrap();
        assert_eq!(load_table(&path).unwrap(), sample_table());
    }

    #[test]
    fn test_save_fails_when_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();
        let err = save_table(&sample_table(), &blocker, "claims.csv").unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert_eq!(err.path(), blocker.as_path());
    }

    #[test]
    fn test_load_rejects_bad_claim_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Province,Gender,Claimed\nProvince_A,Male,3\n").unwrap();
        assert!(matches!(
            load_table(&path).unwrap_err(),
            PersistenceError::Csv { .. }
        ));
    }

    #[test]
    fn test_convert_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_pipe_delimited(
            &dir.path().join("missing.txt"),
            dir.path(),
            "out.csv",
        )
        .unwrap_err();
        match err {
            PersistenceError::Io { source, .. } => assert_eq!(source.kind(), ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_convert_inconsistent_columns() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("ragged.txt");
        fs::write(&source, "a|b|c\n1|2|3\n4|5\n").unwrap();
        let err = convert_pipe_delimited(&source, dir.path(), "out.csv").unwrap_err();
        match err {
            PersistenceError::Shape {
                expected, found, ..
            } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_convert_quotes_embedded_commas() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, "id|note\n1|late, but paid\n").unwrap();
        let out = convert_pipe_delimited(&source, dir.path(), "notes.csv").unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "id,note\n1,\"late, but paid\"\n"
        );
        let back = read_delimited(&out, COMMA_DELIMITER).unwrap();
        assert_eq!(back.rows, vec![vec!["1".to_string(), "late, but paid".to_string()]]);
    }
}
