//! Tests for output module

use super::*;
use crate::error::Error;
use crate::types::{Record, TableFormat};
use arrow::array::{Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use test_case::test_case;

fn record(value: serde_json::Value) -> Record {
    value.as_object().unwrap().clone()
}

fn write_snapshot(dir: &Path, name: &str, value: serde_json::Value) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), serde_json::to_string(&value).unwrap()).unwrap();
}

// ============================================================================
// Cell Rendering Tests
// ============================================================================

#[test_case(json!("Zelda"), Some("Zelda") ; "string unquoted")]
#[test_case(json!(42), Some("42") ; "integer")]
#[test_case(json!(1.5), Some("1.5") ; "float")]
#[test_case(json!(true), Some("true") ; "boolean")]
#[test_case(json!(null), None ; "null")]
#[test_case(json!([1, 2]), Some("[1,2]") ; "array as compact json")]
#[test_case(json!({"id": 7}), Some("{\"id\":7}") ; "object as compact json")]
fn test_cell_text(value: serde_json::Value, expected: Option<&str>) {
    assert_eq!(cell_text(&value).as_deref(), expected);
}

// ============================================================================
// FlatTable Tests
// ============================================================================

#[test]
fn test_table_union_of_keys() {
    let records = vec![record(json!({"a": 1})), record(json!({"a": 2, "b": 3}))];
    let table = FlatTable::from_records(&records);

    assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.cell(0, "a"), Some("1"));
    assert_eq!(table.cell(0, "b"), None);
    assert_eq!(table.cell(1, "a"), Some("2"));
    assert_eq!(table.cell(1, "b"), Some("3"));
}

#[test]
fn test_table_columns_first_seen_order() {
    let records = vec![
        record(json!({"name": "x"})),
        record(json!({"id": 1, "name": "y"})),
        record(json!({"cover": 9})),
    ];
    let table = FlatTable::from_records(&records);

    assert_eq!(table.columns(), &["name", "id", "cover"]);
    assert_eq!(table.cell(2, "name"), None);
    assert_eq!(table.cell(2, "cover"), Some("9"));
}

#[test]
fn test_table_unknown_column_and_row() {
    let table = FlatTable::from_records(&[record(json!({"a": 1}))]);
    assert_eq!(table.cell(0, "missing"), None);
    assert_eq!(table.cell(5, "a"), None);
}

#[test]
fn test_record_batch_is_all_nullable_utf8() {
    let records = vec![record(json!({"a": 1})), record(json!({"a": 2, "b": 3}))];
    let batch = FlatTable::from_records(&records).to_record_batch().unwrap();

    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 2);
    for field in batch.schema().fields() {
        assert_eq!(field.data_type(), &DataType::Utf8);
        assert!(field.is_nullable());
    }

    let b = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert!(b.is_null(0));
    assert_eq!(b.value(1), "3");
}

#[test]
fn test_record_batch_without_columns_fails() {
    let err = FlatTable::new().to_record_batch().unwrap_err();
    assert!(matches!(err, Error::Flatten { .. }));
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_write_csv_nulls_are_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.csv");
    let records = vec![record(json!({"a": 1})), record(json!({"a": 2, "b": 3}))];
    let table = FlatTable::from_records(&records);

    let rows = write_table(&path, &table, TableFormat::Csv).unwrap();

    assert_eq!(rows, 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,\n2,3\n");
}

#[test]
fn test_write_csv_quotes_nested_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.csv");
    let table = FlatTable::from_records(&[record(json!({"id": 1, "genres": [4, 5]}))]);

    write_table(&path, &table, TableFormat::Csv).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "id,genres\n1,\"[4,5]\"\n"
    );
}

#[test]
fn test_write_parquet_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("games.parquet");
    let records = vec![
        record(json!({"id": 1, "name": "Zelda"})),
        record(json!({"id": 2})),
    ];
    let table = FlatTable::from_records(&records);

    let rows = write_table(&path, &table, TableFormat::Parquet).unwrap();
    assert_eq!(rows, 2);

    let file = fs::File::open(&path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total, 2);

    let names = batches[0]
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(names.value(0), "Zelda");
    assert!(names.is_null(1));
}

#[test]
fn test_parquet_writer_config_builder() {
    let config = ParquetWriterConfig::new()
        .with_row_group_size(1000)
        .uncompressed();
    assert_eq!(config.row_group_size(), 1000);
}

// ============================================================================
// Flatten Tests
// ============================================================================

#[test]
fn test_snapshot_files_sorted_and_filtered() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "20240102_000000.000000.json", json!([]));
    write_snapshot(dir.path(), "20240101_000000.000000.json", json!([]));
    fs::write(dir.path().join("20240103_000000.000000.json.tmp"), "[").unwrap();
    fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let files = snapshot_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["20240101_000000.000000.json", "20240102_000000.000000.json"]
    );
}

#[test]
fn test_read_snapshot_rejects_non_objects() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "a.json", json!([{"id": 1}, 2]));

    let err = read_snapshot(&dir.path().join("a.json")).unwrap_err();
    assert!(matches!(err, Error::Flatten { .. }));
    assert!(err.to_string().contains("Record 1"));
}

#[test]
fn test_read_snapshot_rejects_non_array() {
    let dir = tempdir().unwrap();
    write_snapshot(dir.path(), "a.json", json!({"id": 1}));

    let err = read_snapshot(&dir.path().join("a.json")).unwrap_err();
    assert!(matches!(err, Error::Flatten { .. }));
}

#[test]
fn test_flatten_endpoint_across_files() {
    let root = tempdir().unwrap();
    let out = tempdir().unwrap();
    let games = root.path().join("games");
    write_snapshot(&games, "20240101_000000.000001.json", json!([{"a": 1}]));
    write_snapshot(&games, "20240101_000000.000002.json", json!([{"a": 2, "b": 3}]));

    let report = flatten_endpoint(&games, out.path(), TableFormat::Csv)
        .unwrap()
        .unwrap();

    assert_eq!(report.endpoint, "games");
    assert_eq!(report.files_read, 2);
    assert_eq!(report.rows, 2);
    assert_eq!(report.columns, vec!["a", "b"]);
    assert_eq!(report.output, out.path().join("games.csv"));
    assert_eq!(
        fs::read_to_string(&report.output).unwrap(),
        "a,b\n1,\n2,3\n"
    );
}

#[test]
fn test_flatten_endpoint_empty_is_skipped() {
    let root = tempdir().unwrap();
    let out = tempdir().unwrap();
    let games = root.path().join("games");
    write_snapshot(&games, "20240101_000000.000001.json", json!([]));

    let report = flatten_endpoint(&games, out.path(), TableFormat::Csv).unwrap();

    assert!(report.is_none());
    assert!(!out.path().join("games.csv").exists());
}

#[test]
fn test_flatten_endpoint_fieldless_records_are_skipped() {
    let root = tempdir().unwrap();
    let out = tempdir().unwrap();
    let games = root.path().join("games");
    write_snapshot(&games, "20240101_000000.000001.json", json!([{}, {}]));

    let report = flatten_endpoint(&games, out.path(), TableFormat::Csv).unwrap();

    assert!(report.is_none());
    assert!(!out.path().join("games.csv").exists());
}

#[test]
fn test_flatten_endpoint_keeps_fieldless_rows_among_others() {
    let root = tempdir().unwrap();
    let out = tempdir().unwrap();
    let games = root.path().join("games");
    write_snapshot(&games, "20240101_000000.000001.json", json!([{}, {"id": 1}]));

    let report = flatten_endpoint(&games, out.path(), TableFormat::Csv)
        .unwrap()
        .unwrap();

    assert_eq!(report.rows, 2);
    assert_eq!(report.columns, vec!["id"]);
    let csv = fs::read_to_string(&report.output).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.ends_with("1\n"));
}

#[test]
fn test_flatten_all_one_file_per_endpoint() {
    let root = tempdir().unwrap();
    let out = tempdir().unwrap();
    write_snapshot(
        &root.path().join("games"),
        "20240101_000000.000001.json",
        json!([{"id": 1}, {"id": 2}]),
    );
    write_snapshot(
        &root.path().join("platforms"),
        "20240101_000000.000001.json",
        json!([{"id": 6, "name": "PC"}]),
    );
    write_snapshot(
        &root.path().join("empty"),
        "20240101_000000.000001.json",
        json!([]),
    );

    let reports = flatten_all(root.path(), out.path(), TableFormat::Parquet).unwrap();

    let endpoints: Vec<_> = reports.iter().map(|r| r.endpoint.as_str()).collect();
    assert_eq!(endpoints, vec!["games", "platforms"]);
    assert!(out.path().join("games.parquet").exists());
    assert!(out.path().join("platforms.parquet").exists());
    assert!(!out.path().join("empty.parquet").exists());
}

#[test]
fn test_flatten_all_missing_root_fails() {
    let root = tempdir().unwrap();
    let out = tempdir().unwrap();

    let err = flatten_all(&root.path().join("absent"), out.path(), TableFormat::Csv).unwrap_err();
    assert!(matches!(err, Error::Flatten { .. }));
}
