//! Flat table built from JSON records
//!
//! Columns are the union of record keys in first-seen order. Every cell is
//! text or null.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;
use std::sync::Arc;

/// Rows of nullable text cells under a shared header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl FlatTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records in order
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut table = Self::new();
        for record in records {
            table.push(record);
        }
        table
    }

    /// Append one record, registering keys not seen before
    pub fn push(&mut self, record: &Record) {
        for key in record.keys() {
            if !self.index.contains_key(key) {
                self.index.insert(key.clone(), self.columns.len());
                self.columns.push(key.clone());
            }
        }

        let mut row = vec![None; self.columns.len()];
        for (key, value) in record {
            if let Some(&i) = self.index.get(key) {
                row[i] = cell_text(value);
            }
        }
        self.rows.push(row);
    }

    /// Column names in first-seen order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row`, `column`; rows pushed before a column appeared read as null
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let i = *self.index.get(column)?;
        self.rows.get(row)?.get(i)?.as_deref()
    }

    /// Arrow schema: one nullable Utf8 field per column
    pub fn schema(&self) -> SchemaRef {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();
        Arc::new(Schema::new(fields))
    }

    /// Convert to a single Arrow RecordBatch
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        if self.columns.is_empty() {
            return Err(Error::flatten("Cannot build a table without columns"));
        }

        let arrays: Vec<ArrayRef> = (0..self.columns.len())
            .map(|i| {
                let values: StringArray = self
                    .rows
                    .iter()
                    .map(|row| row.get(i).and_then(Option::as_deref))
                    .collect();
                Arc::new(values) as ArrayRef
            })
            .collect();

        Ok(RecordBatch::try_new(self.schema(), arrays)?)
    }
}

/// Text rendering of one JSON value; `None` for null
pub fn cell_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Array(_) | JsonValue::Object(_) => Some(value.to_string()),
    }
}
