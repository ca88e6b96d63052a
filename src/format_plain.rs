use std::io::Write;

use crate::backend::RowCursor;
use crate::column_type::ColumnDescriptor;
use crate::error::OrasqlError;

/// Gap between the longest column name and the separator.
const NAME_MARGIN: usize = 4;

/// Width of the `[TYPE]` annotation column in debug output.
const LABEL_WIDTH: usize = 16;

/// Width every column name is padded to.
pub fn name_width(columns: &[ColumnDescriptor]) -> usize {
    columns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        + NAME_MARGIN
}

/// Write one `NAME : value` line per column per row.
///
/// With `debug`, each line also carries the column's type label:
/// `NAME    [NUMBER(10,2)]   : 3.5`.
pub fn write_plain<C, W>(cursor: &mut C, out: &mut W, debug: bool) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
    W: Write + ?Sized,
{
    let width = name_width(cursor.columns());
    let names: Vec<String> = cursor.columns().iter().map(|c| c.name.clone()).collect();
    let labels: Vec<String> = if debug {
        cursor
            .columns()
            .iter()
            .map(|c| format!("[{}]", c.type_label()))
            .collect()
    } else {
        Vec::new()
    };

    let mut rows = 0;
    while let Some(row) = cursor.next_row()? {
        for (i, (name, value)) in names.iter().zip(&row).enumerate() {
            if debug {
                writeln!(out, "{name:<width$}{:<LABEL_WIDTH$} : {value}", labels[i])?;
            } else {
                writeln!(out, "{name:<width$}: {value}")?;
            }
        }
        rows += 1;
    }
    Ok(rows)
}
