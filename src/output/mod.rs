//! Output module
//!
//! Flattens snapshot directories into tabular files.
//!
//! # Overview
//!
//! - `FlatTable` - union-of-keys table with nullable text cells
//! - `flatten_endpoint` / `flatten_all` - read snapshots, write one table per endpoint
//! - CSV and Parquet writers backed by Arrow

mod flatten;
mod table;
mod writer;

pub use flatten::{flatten_all, flatten_endpoint, read_snapshot, snapshot_files, FlattenReport};
pub use table::{cell_text, FlatTable};
pub use writer::{write_csv, write_parquet, write_table, ParquetWriterConfig};

#[cfg(test)]
mod tests;
