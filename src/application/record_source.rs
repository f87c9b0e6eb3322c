//! Enumeration and loading of per-company JSON files.

use crate::domain::company::{CompanyRecord, CompanySection};
use crate::domain::errors::{PipelineError, RecordError};
use std::fs;
use std::path::{Path, PathBuf};

/// A decoded record together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub path: PathBuf,
    pub identifier: String,
    pub record: CompanyRecord,
}

impl LoadedRecord {
    /// The company section, required for reporting and training.
    pub fn company(&self) -> Result<&CompanySection, RecordError> {
        self.record
            .company
            .as_ref()
            .ok_or_else(|| RecordError::MissingCompany {
                identifier: self.identifier.clone(),
            })
    }
}

/// Lists `*.json` files in `dir`, sorted by name.
pub fn list_record_files(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let missing = || PipelineError::MissingResource {
        what: "Data directory",
        path: dir.to_path_buf(),
    };

    if !dir.is_dir() {
        return Err(missing());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|_| missing())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Reads and decodes one record file.
pub fn load_record(path: &Path) -> Result<LoadedRecord, RecordError> {
    let raw = fs::read_to_string(path).map_err(|source| RecordError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let record = CompanyRecord::from_json(&raw).map_err(|source| RecordError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let identifier = record
        .identifier(path)
        .ok_or_else(|| RecordError::MissingIdentifier {
            path: path.to_path_buf(),
        })?;

    Ok(LoadedRecord {
        path: path.to_path_buf(),
        identifier,
        record,
    })
}
