pub mod oracle;

use std::fmt;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::column_type::ColumnDescriptor;
use crate::error::OrasqlError;

const F64_DIGITS: usize = f64::DIGITS as usize;

/// A single cell value from a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Timestamp(OffsetDateTime),
    Binary(Vec<u8>),
}

impl CellValue {
    /// Classify the driver's text rendering of a numeric column. Values with
    /// more significant digits than an f64 holds stay text.
    pub fn from_numeric_text(text: String) -> Self {
        if let Ok(i) = text.parse::<i64>() {
            return CellValue::Integer(i);
        }
        let digits = text.bytes().filter(u8::is_ascii_digit).count();
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() && digits <= F64_DIGITS => CellValue::Float(f),
            _ => CellValue::Text(text),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("NULL"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Timestamp(ts) => {
                let text = ts
                    .format(format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
                    ))
                    .map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
            CellValue::Binary(bytes) => {
                for b in bytes {
                    write!(f, "{b:02X}")?;
                }
                Ok(())
            }
        }
    }
}

/// Forward-only result cursor. Each row is handed out exactly once.
pub trait RowCursor {
    fn columns(&self) -> &[ColumnDescriptor];

    fn next_row(&mut self) -> Result<Option<Vec<CellValue>>, OrasqlError>;
}

/// A database the CLI can run a query against.
pub trait Backend {
    type Cursor<'a>: RowCursor
    where
        Self: 'a;

    fn execute<'a>(&'a self, sql: &str) -> Result<Self::Cursor<'a>, OrasqlError>;
}

/// Cursor over rows already held in memory.
#[derive(Debug)]
pub struct MemoryCursor {
    columns: Vec<ColumnDescriptor>,
    rows: std::vec::IntoIter<Vec<CellValue>>,
}

impl MemoryCursor {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }
}

impl RowCursor for MemoryCursor {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<CellValue>>, OrasqlError> {
        Ok(self.rows.next())
    }
}
