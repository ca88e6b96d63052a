use std::io::Write;

use crate::backend::RowCursor;
use crate::error::OrasqlError;
use crate::format::cell_to_json;

/// Write rows as a JSON array with one object per line:
///
/// ```text
/// [
///   {"ID": 1, "NAME": "Alice"},
///   {"ID": 2, "NAME": null}
/// ]
/// ```
pub fn write_json<C, W>(cursor: &mut C, out: &mut W) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
    W: Write + ?Sized,
{
    let keys = cursor
        .columns()
        .iter()
        .map(|c| serde_json::to_string(&c.name))
        .collect::<Result<Vec<_>, _>>()?;

    out.write_all(b"[\n")?;
    let mut rows = 0;
    while let Some(row) = cursor.next_row()? {
        if rows > 0 {
            out.write_all(b",\n")?;
        }
        out.write_all(b"  {")?;
        for (i, (key, value)) in keys.iter().zip(&row).enumerate() {
            if i > 0 {
                out.write_all(b", ")?;
            }
            let json = serde_json::to_string(&cell_to_json(value)?)?;
            write!(out, "{key}: {json}")?;
        }
        out.write_all(b"}")?;
        rows += 1;
    }
    if rows > 0 {
        out.write_all(b"\n")?;
    }
    out.write_all(b"]\n")?;
    Ok(rows)
}

/// Write `<json>: <json>` per row. The result must have exactly two columns.
pub fn write_key_value<C, W>(cursor: &mut C, out: &mut W) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
    W: Write + ?Sized,
{
    let mut rows = 0;
    while let Some(row) = cursor.next_row()? {
        let [key, value] = row.as_slice() else {
            return Err(OrasqlError::config(format!(
                "kv output needs exactly 2 columns, row has {}",
                row.len()
            )));
        };
        let key = serde_json::to_string(&cell_to_json(key)?)?;
        let value = serde_json::to_string(&cell_to_json(value)?)?;
        writeln!(out, "{key}: {value}")?;
        rows += 1;
    }
    Ok(rows)
}
