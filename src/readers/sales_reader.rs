use crate::error::{ProcessingError, Result};
use crate::models::RawRecord;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_FILE_PREFIX, INPUT_EXTENSION};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 5] = ["product", "price", "quantity", "date", "region"];

/// Finds and reads raw daily sales extracts.
pub struct SalesReader {
    file_prefix: String,
}

impl SalesReader {
    pub fn new() -> Self {
        Self::with_file_prefix(DEFAULT_FILE_PREFIX)
    }

    pub fn with_file_prefix(prefix: impl Into<String>) -> Self {
        Self {
            file_prefix: prefix.into(),
        }
    }

    /// List `<prefix>*.csv` files in `dir`, sorted by file name.
    ///
    /// An existing directory with no matching files is not an error.
    pub fn discover_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ProcessingError::MissingInput(dir.to_path_buf()));
        }

        let entries =
            fs::read_dir(dir).map_err(|_| ProcessingError::MissingInput(dir.to_path_buf()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();

            if !path.is_file() || path.extension().map_or(true, |ext| ext != INPUT_EXTENSION) {
                continue;
            }

            let matches_prefix = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with(&self.file_prefix));

            if matches_prefix {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!(dir = %dir.display(), count = files.len(), "discovered input files");

        Ok(files)
    }

    /// Stream the rows of one extract together with their line numbers.
    pub fn stream_records(&self, path: &Path) -> Result<RawRecordIterator> {
        RawRecordIterator::new(path)
    }
}

impl Default for SalesReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the rows of a raw extract, yielding `(line, record)`.
pub struct RawRecordIterator {
    reader: Reader<File>,
    headers: StringRecord,
    row: StringRecord,
    path: PathBuf,
}

impl RawRecordIterator {
    fn new(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .buffer_capacity(DEFAULT_BUFFER_SIZE)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ProcessingError::malformed(
                    path,
                    1,
                    format!("missing column '{}'", column),
                ));
            }
        }

        Ok(Self {
            reader,
            headers,
            row: StringRecord::new(),
            path: path.to_path_buf(),
        })
    }

    fn read_next(&mut self) -> Result<Option<(u64, RawRecord)>> {
        let more = self.reader.read_record(&mut self.row).map_err(|e| {
            let line = e.position().map_or(0, |p| p.line());
            ProcessingError::malformed(&self.path, line, e.to_string())
        })?;

        if !more {
            return Ok(None);
        }

        let line = self.row.position().map_or(0, |p| p.line());
        let record = self
            .row
            .deserialize::<RawRecord>(Some(&self.headers))
            .map_err(|e| ProcessingError::malformed(&self.path, line, e.to_string()))?;

        Ok(Some((line, record)))
    }
}

impl Iterator for RawRecordIterator {
    type Item = Result<(u64, RawRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}
