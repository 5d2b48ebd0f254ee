//! Common types used throughout igdb-ingest
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single API record: an arbitrary key-value mapping
pub type Record = JsonObject;

/// One page of records, in the order the API returned them
pub type Page = Vec<Record>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Tabular Output Format
// ============================================================================

/// File format produced by the flattener
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Apache Parquet, one nullable Utf8 column per key
    Parquet,
}

impl TableFormat {
    /// File extension (without the dot) for this format
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_format_extension() {
        assert_eq!(TableFormat::Csv.extension(), "csv");
        assert_eq!(TableFormat::Parquet.extension(), "parquet");
        assert_eq!(TableFormat::default(), TableFormat::Csv);
    }

    #[test]
    fn test_table_format_serde() {
        let json = serde_json::to_string(&TableFormat::Parquet).unwrap();
        assert_eq!(json, "\"parquet\"");
        let parsed: TableFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, TableFormat::Csv);
    }
}
