use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::backend::{CellValue, RowCursor};
use crate::error::OrasqlError;

/// Token written for SQL NULL. Always bare, so it differs from the text `"NULL"`.
pub const NULL_TOKEN: &str = "NULL";

/// Write query results as CSV: a header of quoted column names, then one
/// line per row. Numeric and date/time columns are bare, everything else is
/// quoted with embedded quotes doubled.
pub fn write_csv<C, W>(cursor: &mut C, out: &mut W) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
    W: Write + ?Sized,
{
    // Quoting is decided per column type, so the writer must never add its own.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    let bare: Vec<bool> = cursor
        .columns()
        .iter()
        .map(|c| c.column_type.is_numeric() || c.column_type.is_temporal())
        .collect();

    writer.write_record(cursor.columns().iter().map(|c| quote(&c.name)))?;

    let mut rows = 0;
    while let Some(row) = cursor.next_row()? {
        writer.write_record(row.iter().zip(&bare).map(|(value, bare)| field(value, *bare)))?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

fn field(value: &CellValue, bare: bool) -> String {
    match value {
        CellValue::Null => NULL_TOKEN.to_string(),
        v if bare => v.to_string(),
        v => quote(&v.to_string()),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
