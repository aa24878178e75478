use crate::error::Result;
use crate::models::CanonicalTable;
use crate::utils::constants::CANONICAL_HEADER;
use csv::{Terminator, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Writes the canonical table, replacing any previous file atomically.
pub struct CanonicalWriter;

impl CanonicalWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `table` into `writer` in canonical layout.
    pub fn write_to<W: Write>(&self, table: &CanonicalTable, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer.write_record(CANONICAL_HEADER)?;
        for record in table.records() {
            csv_writer.write_record(record.to_row())?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// Write `table` to `path`. The content goes to a temporary file next to
    /// the target first so a failed run never leaves a partial table behind.
    pub fn write(&self, table: &CanonicalTable, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        self.write_to(table, temp.as_file_mut())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        info!(path = %path.display(), rows = table.len(), "wrote canonical table");
        Ok(())
    }
}

impl Default for CanonicalWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CanonicalRecord;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn table() -> CanonicalTable {
        CanonicalTable::from_records(vec![
            CanonicalRecord::new(
                Decimal::new(6, 0),
                NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
                "north".to_string(),
            ),
            CanonicalRecord::new(
                Decimal::new(45, 1),
                NaiveDate::from_ymd_opt(2021, 1, 9).unwrap(),
                "south".to_string(),
            ),
        ])
    }

    #[test]
    fn test_write_to_layout() -> Result<()> {
        let mut buffer = Vec::new();
        CanonicalWriter::new().write_to(&table(), &mut buffer)?;

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Sales,Date,Region\n6.00,2021-01-10,north\n4.50,2021-01-09,south\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_creates_directories_and_overwrites() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("nested").join("out").join("sales.csv");

        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, "stale content that is longer than the new table\n".repeat(10))?;

        CanonicalWriter::new().write(&CanonicalTable::default(), &path)?;
        assert_eq!(fs::read_to_string(&path)?, "Sales,Date,Region\n");

        let fresh = dir.path().join("fresh").join("sales.csv");
        CanonicalWriter::new().write(&table(), &fresh)?;
        assert!(fs::read_to_string(&fresh)?.starts_with("Sales,Date,Region\n6.00,"));
        Ok(())
    }
}
