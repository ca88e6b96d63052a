use std::io::Write;

use clap::ValueEnum;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;

use crate::backend::{CellValue, RowCursor};
use crate::column_type::ColumnDescriptor;
use crate::error::OrasqlError;
use crate::output::Destination;
use crate::{format_csv, format_json, format_plain, format_xlsx, format_yaml};

/// Output encodings. Exactly one is selected per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Aligned `NAME : value` lines
    #[default]
    #[value(name = "out")]
    #[serde(rename = "out")]
    Plain,
    /// Array of row objects
    Json,
    /// One document with rows keyed by index
    Yaml,
    /// Header plus one line per row
    Csv,
    /// `<json>: <json>` per row, two columns only
    #[value(name = "kv")]
    #[serde(rename = "kv")]
    KeyValue,
    /// Sheet in an xlsx workbook
    #[value(name = "xls", alias = "xlsx")]
    #[serde(rename = "xls", alias = "xlsx")]
    Xlsx,
}

impl OutputMode {
    pub fn label(self) -> &'static str {
        match self {
            OutputMode::Plain => "plain",
            OutputMode::Json => "JSON",
            OutputMode::Yaml => "YAML",
            OutputMode::Csv => "CSV",
            OutputMode::KeyValue => "key/value",
            OutputMode::Xlsx => "xlsx",
        }
    }
}

/// Fail before any row is read if the result shape does not fit the mode.
pub fn check_column_count(mode: OutputMode, columns: &[ColumnDescriptor]) -> Result<(), OrasqlError> {
    if mode == OutputMode::KeyValue && columns.len() != 2 {
        return Err(OrasqlError::config(format!(
            "kv output needs exactly 2 columns, query returned {}",
            columns.len()
        )));
    }
    Ok(())
}

/// Consume the cursor once and write it to the destination. Returns the row count.
pub fn render<C>(
    cursor: &mut C,
    mode: OutputMode,
    debug: bool,
    destination: &mut Destination,
) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
{
    check_column_count(mode, cursor.columns())?;

    match (mode, destination) {
        (OutputMode::Xlsx, Destination::Workbook(target)) => {
            format_xlsx::write_workbook(cursor, target)
        }
        (OutputMode::Xlsx, Destination::Writer(_)) | (_, Destination::Workbook(_)) => {
            Err(OrasqlError::config(
                "xls output must go to a workbook file and other modes cannot",
            ))
        }
        (mode, Destination::Writer(out)) => {
            let rows = render_text(cursor, mode, debug, out)?;
            out.flush()?;
            Ok(rows)
        }
    }
}

/// Stream one of the text encodings to `out`.
pub fn render_text<C, W>(
    cursor: &mut C,
    mode: OutputMode,
    debug: bool,
    out: &mut W,
) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
    W: Write + ?Sized,
{
    check_column_count(mode, cursor.columns())?;

    match mode {
        OutputMode::Plain => format_plain::write_plain(cursor, out, debug),
        OutputMode::Json => format_json::write_json(cursor, out),
        OutputMode::KeyValue => format_json::write_key_value(cursor, out),
        OutputMode::Csv => format_csv::write_csv(cursor, out),
        OutputMode::Yaml => format_yaml::write_yaml(cursor, out),
        OutputMode::Xlsx => Err(OrasqlError::config(
            "xls output is binary and needs a workbook path",
        )),
    }
}

/// Marshal one cell to its JSON value.
pub fn cell_to_json(value: &CellValue) -> Result<serde_json::Value, OrasqlError> {
    Ok(match value {
        CellValue::Null => serde_json::Value::Null,
        CellValue::Text(s) => serde_json::Value::String(s.clone()),
        CellValue::Integer(i) => serde_json::Value::from(*i),
        CellValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| OrasqlError::format(format!("{f} has no JSON representation")))?,
        CellValue::Timestamp(ts) => serde_json::Value::String(
            ts.format(&Rfc3339)
                .map_err(|e| OrasqlError::format(format!("cannot marshal timestamp: {e}")))?,
        ),
        CellValue::Binary(_) => serde_json::Value::String(value.to_string()),
    })
}

/// Build a flat object for one row, keys in column order.
pub fn row_to_json(names: &[String], row: &[CellValue]) -> Result<serde_json::Value, OrasqlError> {
    let mut map = serde_json::Map::new();
    for (name, value) in names.iter().zip(row) {
        map.insert(name.clone(), cell_to_json(value)?);
    }
    Ok(serde_json::Value::Object(map))
}

pub(crate) fn column_names(columns: &[ColumnDescriptor]) -> Vec<String> {
    columns.iter().map(|c| c.name.clone()).collect()
}
