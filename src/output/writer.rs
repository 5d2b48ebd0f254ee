//! Table writers
//!
//! CSV through the arrow csv writer and Parquet through `ArrowWriter`.

use crate::error::{Error, Result};
use crate::types::TableFormat;
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::Path;

use super::table::FlatTable;

/// Configuration for Parquet output
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024,
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression algorithm
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    /// Get row group size
    #[must_use]
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Write `table` to `path` in `format`, replacing any existing file.
///
/// Returns the number of rows written.
pub fn write_table(path: &Path, table: &FlatTable, format: TableFormat) -> Result<usize> {
    let batch = table.to_record_batch()?;
    match format {
        TableFormat::Csv => write_csv(path, &batch),
        TableFormat::Parquet => write_parquet(path, &batch, &ParquetWriterConfig::default()),
    }
}

/// Write a RecordBatch as CSV with a header row
pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<usize> {
    let file = create_file(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;

    let file = writer.into_inner();
    file.sync_all()?;
    Ok(batch.num_rows())
}

/// Write a RecordBatch to a Parquet file
pub fn write_parquet(
    path: &Path,
    batch: &RecordBatch,
    config: &ParquetWriterConfig,
) -> Result<usize> {
    let file = create_file(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(config.build_properties()))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(batch.num_rows())
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::flatten(format!(
                    "Failed to create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    File::create(path)
        .map_err(|e| Error::flatten(format!("Failed to create {}: {e}", path.display())))
}
