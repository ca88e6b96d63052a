use orasql::backend::{CellValue, MemoryCursor};
use orasql::column_type::{ColumnDescriptor, ColumnType};
use orasql::error::OrasqlError;
use orasql::format_json::{write_json, write_key_value};
use time::macros::datetime;

fn emp_cursor() -> MemoryCursor {
    MemoryCursor::new(
        vec![
            ColumnDescriptor::new("ID", ColumnType::Number),
            ColumnDescriptor::new("NAME", ColumnType::Varchar2),
        ],
        vec![
            vec![CellValue::Integer(1), CellValue::Text("Alice".into())],
            vec![CellValue::Integer(2), CellValue::Null],
        ],
    )
}

fn json_of(cursor: &mut MemoryCursor) -> String {
    let mut buf = Vec::new();
    write_json(cursor, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn one_object_per_line() {
    let output = json_of(&mut emp_cursor());
    assert_eq!(
        output,
        "[\n  {\"ID\": 1, \"NAME\": \"Alice\"},\n  {\"ID\": 2, \"NAME\": null}\n]\n"
    );
}

#[test]
fn output_parses_with_keys_in_column_order() {
    let mut cursor = MemoryCursor::new(
        vec![
            ColumnDescriptor::new("Z", ColumnType::Varchar2),
            ColumnDescriptor::new("A", ColumnType::Number),
            ColumnDescriptor::new("M", ColumnType::Date),
        ],
        vec![vec![
            CellValue::Text("quote \" and \\ slash".into()),
            CellValue::Float(2.5),
            CellValue::Timestamp(datetime!(2022-01-06 18:26:37 UTC)),
        ]],
    );

    let parsed: serde_json::Value = serde_json::from_str(&json_of(&mut cursor)).unwrap();
    let row = parsed[0].as_object().unwrap();
    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Z", "A", "M"]);
    assert_eq!(row["Z"], "quote \" and \\ slash");
    assert_eq!(row["A"], 2.5);
    assert_eq!(row["M"], "2022-01-06T18:26:37Z");
}

#[test]
fn empty_result_is_empty_array() {
    let mut cursor = MemoryCursor::new(vec![ColumnDescriptor::new("X", ColumnType::Number)], vec![]);
    let output = json_of(&mut cursor);
    assert_eq!(output, "[\n]\n");
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn non_finite_float_is_format_error() {
    let mut cursor = MemoryCursor::new(
        vec![ColumnDescriptor::new("F", ColumnType::BinaryDouble)],
        vec![vec![CellValue::Float(f64::NAN)]],
    );
    let mut buf = Vec::new();
    let err = write_json(&mut cursor, &mut buf).unwrap_err();
    assert!(matches!(err, OrasqlError::Format { .. }), "got {err:?}");
}

#[test]
fn key_value_lines() {
    let mut buf = Vec::new();
    let rows = write_key_value(&mut emp_cursor(), &mut buf).unwrap();
    assert_eq!(rows, 2);
    assert_eq!(String::from_utf8(buf).unwrap(), "1: \"Alice\"\n2: null\n");
}

#[test]
fn key_value_rejects_wider_rows() {
    let mut cursor = MemoryCursor::new(
        vec![
            ColumnDescriptor::new("A", ColumnType::Number),
            ColumnDescriptor::new("B", ColumnType::Number),
            ColumnDescriptor::new("C", ColumnType::Number),
        ],
        vec![vec![CellValue::Integer(1), CellValue::Integer(2), CellValue::Integer(3)]],
    );
    let mut buf = Vec::new();
    let err = write_key_value(&mut cursor, &mut buf).unwrap_err();
    assert!(matches!(err, OrasqlError::Config { .. }), "got {err:?}");
    assert!(buf.is_empty());
}

#[test]
fn binary_double_values_stay_numbers() {
    let mut cursor = MemoryCursor::new(
        vec![
            ColumnDescriptor::new("D", ColumnType::BinaryDouble),
            ColumnDescriptor::new("BIG", ColumnType::BinaryDouble),
        ],
        vec![vec![CellValue::Float(0.1 + 0.2), CellValue::Float(1e300)]],
    );

    let parsed: serde_json::Value = serde_json::from_str(&json_of(&mut cursor)).unwrap();
    assert!(parsed[0]["D"].is_f64());
    assert_eq!(parsed[0]["D"], 0.30000000000000004);
    assert_eq!(parsed[0]["BIG"], 1e300);
}

#[test]
fn key_value_non_finite_double_is_format_error() {
    let mut cursor = MemoryCursor::new(
        vec![
            ColumnDescriptor::new("K", ColumnType::Varchar2),
            ColumnDescriptor::new("V", ColumnType::BinaryDouble),
        ],
        vec![vec![CellValue::Text("ratio".into()), CellValue::Float(f64::INFINITY)]],
    );
    let mut buf = Vec::new();
    let err = write_key_value(&mut cursor, &mut buf).unwrap_err();
    assert!(matches!(err, OrasqlError::Format { .. }), "got {err:?}");
}
