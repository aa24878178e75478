use crate::error::{ProcessingError, Result};
use crate::models::{normalize_product, CanonicalRecord, CanonicalTable};
use crate::readers::SalesReader;
use crate::utils::constants::DEFAULT_PRODUCT;
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Counters collected over one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub files_scanned: usize,
    pub rows_read: usize,
    pub rows_retained: usize,
    pub rows_dropped: usize,
}

impl IngestReport {
    pub fn summary(&self) -> String {
        format!(
            "Ingestion Summary:\n  Files: {}\n  Rows read: {}\n  Line items retained: {}\n  Rows dropped (other products): {}",
            self.files_scanned, self.rows_read, self.rows_retained, self.rows_dropped
        )
    }
}

/// Merges raw extracts into the canonical table for one product.
pub struct Normalizer {
    reader: SalesReader,
    product: String,
}

impl Normalizer {
    pub fn new(product: &str) -> Self {
        Self {
            reader: SalesReader::new(),
            product: normalize_product(product),
        }
    }

    pub fn with_file_prefix(mut self, prefix: &str) -> Self {
        self.reader = SalesReader::with_file_prefix(prefix);
        self
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// Read every matching extract in file-name order and keep the target
    /// product's rows in encounter order. The first malformed row aborts.
    pub fn normalize(
        &self,
        input_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<(CanonicalTable, IngestReport)> {
        let files = self.reader.discover_files(input_dir)?;
        let mut report = IngestReport {
            files_scanned: files.len(),
            ..IngestReport::default()
        };

        if files.is_empty() {
            warn!(dir = %input_dir.display(), "no input files matched, canonical table will be empty");
        }
        if let Some(p) = progress {
            p.set_length(files.len() as u64);
        }

        let mut records: Vec<CanonicalRecord> = Vec::new();
        for path in &files {
            if let Some(p) = progress {
                p.set_message(&format!("Reading {}", path.display()));
            }

            let before = records.len();
            for row in self.reader.stream_records(path)? {
                let (line, raw) = row?;
                report.rows_read += 1;

                if !raw.is_product(&self.product) {
                    trace!(file = %path.display(), line, product = %raw.product, "dropping row");
                    report.rows_dropped += 1;
                    continue;
                }

                let record = raw
                    .to_canonical()
                    .map_err(|message| ProcessingError::malformed(path, line, message))?;
                records.push(record);
            }

            debug!(
                file = %path.display(),
                retained = records.len() - before,
                "processed input file"
            );
            if let Some(p) = progress {
                p.increment(1);
            }
        }

        report.rows_retained = records.len();
        info!(
            files = report.files_scanned,
            rows = report.rows_read,
            retained = report.rows_retained,
            product = %self.product,
            "normalization complete"
        );

        Ok((CanonicalTable::from_records(records), report))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCT)
    }
}

/// Build the canonical table for `target_product` from `input_dir`.
pub fn normalize(input_dir: &Path, target_product: &str) -> Result<CanonicalTable> {
    Normalizer::new(target_product)
        .normalize(input_dir, None)
        .map(|(table, _)| table)
}
