use std::io::Write;

use serde_yaml::{Mapping, Number, Value};

use crate::backend::RowCursor;
use crate::error::OrasqlError;
use crate::format::{column_names, row_to_json};

/// Write every row into one YAML document, keyed by 1-based row index,
/// followed by the row count:
///
/// ```text
/// rows:
///   1:
///     ID: 1
///     NAME: Alice
/// count: 1
/// ```
///
/// Rows are serialized one at a time and indented under `rows:`, so the
/// result set is never held in memory.
pub fn write_yaml<C, W>(cursor: &mut C, out: &mut W) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
    W: Write + ?Sized,
{
    let names = column_names(cursor.columns());

    let mut rows: u64 = 0;
    while let Some(row) = cursor.next_row()? {
        if rows == 0 {
            out.write_all(b"rows:\n")?;
        }
        rows += 1;

        let mut entry = Mapping::new();
        entry.insert(
            Value::Number(Number::from(rows)),
            serde_yaml::to_value(row_to_json(&names, &row)?)?,
        );
        for line in serde_yaml::to_string(&entry)?.lines() {
            writeln!(out, "  {line}")?;
        }
    }

    if rows == 0 {
        out.write_all(b"rows: {}\n")?;
    }
    writeln!(out, "count: {rows}")?;
    Ok(rows as usize)
}
