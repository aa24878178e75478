use crate::error::{ProcessingError, Result};
use crate::models::region::is_all_regions;
use crate::models::{CanonicalRecord, CanonicalTable};
use crate::utils::constants::{CANONICAL_HEADER, DATE_FORMAT, DEFAULT_BUFFER_SIZE};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use validator::Validate;

/// Loads the canonical table. Any unparsable row fails the whole load.
pub struct CanonicalReader;

impl CanonicalReader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<CanonicalTable> {
        let mut reader = ReaderBuilder::new()
            .buffer_capacity(DEFAULT_BUFFER_SIZE)
            .from_path(path)
            .map_err(|e| ProcessingError::canonical(path, 0, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| ProcessingError::canonical(path, 1, e.to_string()))?;
        if headers.iter().ne(CANONICAL_HEADER) {
            return Err(ProcessingError::canonical(
                path,
                1,
                format!(
                    "expected header '{}', found '{}'",
                    CANONICAL_HEADER.join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            ));
        }

        let mut records = Vec::new();
        // Bounds every per-date and per-region sum taken over the table.
        let mut magnitude = Decimal::ZERO;
        let mut row = StringRecord::new();
        loop {
            let more = reader.read_record(&mut row).map_err(|e| {
                let line = e.position().map_or(0, |p| p.line());
                ProcessingError::canonical(path, line, e.to_string())
            })?;
            if !more {
                break;
            }

            let line = row.position().map_or(0, |p| p.line());
            let record = Self::parse_row(&row)
                .map_err(|message| ProcessingError::canonical(path, line, message))?;
            magnitude = magnitude.checked_add(record.sales.abs()).ok_or_else(|| {
                ProcessingError::canonical(path, line, "sales total exceeds the representable range")
            })?;
            records.push(record);
        }

        let table = CanonicalTable::from_records(records);
        info!(
            path = %path.display(),
            rows = table.len(),
            regions = table.regions().len(),
            "loaded canonical table"
        );

        Ok(table)
    }

    fn parse_row(row: &StringRecord) -> std::result::Result<CanonicalRecord, String> {
        let field = |index: usize| row.get(index).unwrap_or_default();

        let sales_str = field(0);
        let sales = Decimal::from_str(sales_str.trim())
            .map_err(|_| format!("invalid sales value: '{}'", sales_str))?;

        let date_str = field(1);
        let date = NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
            .map_err(|_| format!("invalid date: '{}'", date_str))?;

        let region = field(2);
        if is_all_regions(region) {
            return Err(format!("region '{}' collides with the all-regions option", region));
        }

        let record = CanonicalRecord {
            sales,
            date,
            region: region.to_string(),
        };
        record
            .validate()
            .map_err(|e| format!("invalid region '{}': {}", region, e))?;

        Ok(record)
    }
}

impl Default for CanonicalReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a canonical table with the default reader.
pub fn load(path: &Path) -> Result<CanonicalTable> {
    CanonicalReader::new().load(path)
}
