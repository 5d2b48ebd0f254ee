//! Snapshot flattening
//!
//! Turns each endpoint directory of page snapshots into one table file.

use crate::error::{Error, Result};
use crate::snapshot::SNAPSHOT_EXTENSION;
use crate::types::{JsonValue, Record, TableFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::table::FlatTable;
use super::writer::write_table;

/// Outcome of flattening one endpoint directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenReport {
    /// Endpoint (directory) name
    pub endpoint: String,
    /// Table file written
    pub output: PathBuf,
    /// Snapshot files read
    pub files_read: usize,
    /// Rows written
    pub rows: usize,
    /// Column names in output order
    pub columns: Vec<String>,
}

/// Snapshot files in `dir`, sorted by file name
pub fn snapshot_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::flatten(format!(
            "Failed to read snapshot directory {}: {e}",
            dir.display()
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_snapshot = path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(SNAPSHOT_EXTENSION);
        if is_snapshot {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-snapshot entry");
        }
    }
    files.sort();
    Ok(files)
}

/// Read one snapshot file as a list of records
pub fn read_snapshot(path: &Path) -> Result<Vec<Record>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::flatten(format!("Failed to read {}: {e}", path.display())))?;

    let value: JsonValue = serde_json::from_str(&contents)
        .map_err(|e| Error::flatten(format!("Invalid JSON in {}: {e}", path.display())))?;

    let JsonValue::Array(items) = value else {
        return Err(Error::flatten(format!(
            "{} does not contain a JSON array",
            path.display()
        )));
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match item {
            JsonValue::Object(record) => records.push(record),
            _ => {
                return Err(Error::flatten(format!(
                    "Record {i} in {} is not an object",
                    path.display()
                )))
            }
        }
    }
    Ok(records)
}

/// Flatten one endpoint directory into `<out_dir>/<endpoint>.<ext>`.
///
/// Returns `None` when the directory holds no records, or only records
/// without any fields.
pub fn flatten_endpoint(
    dir: &Path,
    out_dir: &Path,
    format: TableFormat,
) -> Result<Option<FlattenReport>> {
    let endpoint = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::flatten(format!("Invalid endpoint directory: {}", dir.display())))?
        .to_string();

    let files = snapshot_files(dir)?;
    let mut table = FlatTable::new();
    for file in &files {
        for record in read_snapshot(file)? {
            table.push(&record);
        }
    }

    if table.is_empty() {
        warn!(
            endpoint = %endpoint,
            files = files.len(),
            "No records found, skipping"
        );
        return Ok(None);
    }

    // A table without columns has no CSV header or Parquet schema to write
    if table.columns().is_empty() {
        warn!(
            endpoint = %endpoint,
            files = files.len(),
            records = table.num_rows(),
            "Records have no fields, skipping"
        );
        return Ok(None);
    }

    let output = out_dir.join(format!("{endpoint}.{}", format.extension()));
    let rows = write_table(&output, &table, format)?;

    info!(
        endpoint = %endpoint,
        files = files.len(),
        rows,
        columns = table.columns().len(),
        output = %output.display(),
        "Endpoint flattened"
    );

    Ok(Some(FlattenReport {
        endpoint,
        output,
        files_read: files.len(),
        rows,
        columns: table.columns().to_vec(),
    }))
}

/// Flatten every endpoint directory under `root`, in name order
pub fn flatten_all(root: &Path, out_dir: &Path, format: TableFormat) -> Result<Vec<FlattenReport>> {
    let entries = fs::read_dir(root).map_err(|e| {
        Error::flatten(format!(
            "Failed to read snapshot root {}: {e}",
            root.display()
        ))
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut reports = Vec::new();
    for dir in dirs {
        if let Some(report) = flatten_endpoint(&dir, out_dir, format)? {
            reports.push(report);
        }
    }
    Ok(reports)
}
