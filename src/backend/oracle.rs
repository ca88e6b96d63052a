use ::oracle::sql_type::{OracleType, Timestamp};
use ::oracle::{Connection, ResultSet, Row};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::backend::{Backend, CellValue, RowCursor};
use crate::column_type::{CharsetForm, ColumnDescriptor, ColumnType};
use crate::dsn::ConnectionString;
use crate::error::OrasqlError;
use crate::masking;

pub struct OracleBackend {
    conn: Connection,
}

impl OracleBackend {
    pub fn connect(target: &ConnectionString, show_secrets: bool) -> Result<Self, OrasqlError> {
        let conn = Connection::connect(&target.user, target.password(), &target.locator)
            .map_err(|e| OrasqlError::Connection {
                message: masking::scrub(
                    &format!("open connection to {} failed: {}", target.locator, e),
                    &target.password,
                    show_secrets,
                ),
            })?;
        Ok(Self { conn })
    }

    /// Close explicitly so that a failing close is reported, not swallowed by Drop.
    pub fn close(self) -> Result<(), OrasqlError> {
        self.conn.close().map_err(|e| OrasqlError::Connection {
            message: format!("connection close failed: {e}"),
        })
    }
}

impl Backend for OracleBackend {
    type Cursor<'a> = OracleCursor<'a>;

    fn execute<'a>(&'a self, sql: &str) -> Result<OracleCursor<'a>, OrasqlError> {
        let rows = self.conn.query(sql, &[]).map_err(|e| OrasqlError::Query {
            message: format!("query execution failed: {e}"),
        })?;

        let columns = rows
            .column_info()
            .iter()
            .map(|info| describe(info.name(), info.oracle_type()))
            .collect();

        Ok(OracleCursor { rows, columns })
    }
}

pub struct OracleCursor<'a> {
    rows: ResultSet<'a, Row>,
    columns: Vec<ColumnDescriptor>,
}

impl RowCursor for OracleCursor<'_> {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<CellValue>>, OrasqlError> {
        let Some(row) = self.rows.next() else {
            return Ok(None);
        };
        let row = row.map_err(|e| OrasqlError::Query {
            message: format!("fetch error: {e}"),
        })?;

        self.columns
            .iter()
            .enumerate()
            .map(|(idx, col)| read_cell(&row, idx, col))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Translate the driver's type description into a column descriptor.
fn describe(name: &str, oracle_type: &OracleType) -> ColumnDescriptor {
    let col = |t: ColumnType| ColumnDescriptor::new(name, t);

    match oracle_type {
        OracleType::Varchar2(len) => {
            col(ColumnType::Varchar2).with_char_len(*len, CharsetForm::Byte)
        }
        OracleType::NVarchar2(len) => {
            col(ColumnType::Varchar2).with_char_len(*len, CharsetForm::Wide)
        }
        OracleType::Char(len) => col(ColumnType::Char).with_char_len(*len, CharsetForm::Byte),
        OracleType::NChar(len) => col(ColumnType::Char).with_char_len(*len, CharsetForm::Wide),
        OracleType::Number(precision, scale) => {
            // -127 marks a NUMBER declared without a scale
            let scale = (*scale != -127).then_some(*scale);
            col(ColumnType::Number).with_precision(*precision, scale)
        }
        OracleType::Float(precision) => col(ColumnType::Float).with_precision(*precision, None),
        OracleType::BinaryFloat => col(ColumnType::BinaryFloat),
        OracleType::BinaryDouble => col(ColumnType::BinaryDouble),
        OracleType::Int64 | OracleType::UInt64 => col(ColumnType::Integer),
        OracleType::Date => col(ColumnType::Date),
        OracleType::Timestamp(fsprec) => col(ColumnType::Timestamp).with_precision(*fsprec, None),
        OracleType::TimestampTZ(fsprec) => {
            col(ColumnType::TimestampTz).with_precision(*fsprec, None)
        }
        OracleType::TimestampLTZ(fsprec) => {
            col(ColumnType::TimestampLtz).with_precision(*fsprec, None)
        }
        OracleType::IntervalDS(_, _) => col(ColumnType::IntervalDs),
        OracleType::IntervalYM(_) => col(ColumnType::IntervalYm),
        OracleType::Raw(len) => col(ColumnType::Raw).with_char_len(*len, CharsetForm::Byte),
        OracleType::Rowid => col(ColumnType::Rowid),
        OracleType::CLOB => col(ColumnType::Clob),
        OracleType::NCLOB => col(ColumnType::Clob).with_char_len(0, CharsetForm::Wide),
        OracleType::BLOB => col(ColumnType::Blob),
        OracleType::BFILE => col(ColumnType::Bfile),
        OracleType::Long => col(ColumnType::Long),
        OracleType::LongRaw => col(ColumnType::LongRaw),
        OracleType::Boolean => col(ColumnType::Boolean),
        OracleType::Json => col(ColumnType::Json),
        OracleType::RefCursor => col(ColumnType::Other(102)),
        _ => col(ColumnType::Other(0)),
    }
}

fn read_cell(row: &Row, idx: usize, col: &ColumnDescriptor) -> Result<CellValue, OrasqlError> {
    let fetch_err = |e: ::oracle::Error| OrasqlError::Query {
        message: format!("cannot read column {}: {}", col.name, e),
    };

    let t = col.column_type;
    if t.is_temporal() {
        let value: Option<Timestamp> = row.get(idx).map_err(fetch_err)?;
        return match value {
            Some(ts) => to_offset_datetime(&ts)
                .map(CellValue::Timestamp)
                .map_err(|e| OrasqlError::Query {
                    message: format!("column {} holds an invalid timestamp: {}", col.name, e),
                }),
            None => Ok(CellValue::Null),
        };
    }

    match t {
        ColumnType::BinaryDouble => {
            let value: Option<f64> = row.get(idx).map_err(fetch_err)?;
            return Ok(value.map_or(CellValue::Null, CellValue::Float));
        }
        ColumnType::BinaryFloat => {
            let value: Option<f32> = row.get(idx).map_err(fetch_err)?;
            return Ok(value.map_or(CellValue::Null, |f| CellValue::Float(widen_f32(f))));
        }
        _ => {}
    }

    if t.is_binary() {
        let value: Option<Vec<u8>> = row.get(idx).map_err(fetch_err)?;
        return Ok(value.map_or(CellValue::Null, CellValue::Binary));
    }

    let value: Option<String> = row.get(idx).map_err(fetch_err)?;
    Ok(match value {
        None => CellValue::Null,
        Some(text) if t.is_numeric() => CellValue::from_numeric_text(text),
        Some(text) => CellValue::Text(text),
    })
}

/// Widen through the shortest decimal form, so `0.1f32` becomes `0.1`
/// instead of `0.10000000149011612`.
fn widen_f32(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

fn to_offset_datetime(ts: &Timestamp) -> Result<OffsetDateTime, time::error::ComponentRange> {
    let month = Month::try_from(ts.month() as u8)?;
    let date = Date::from_calendar_date(ts.year(), month, ts.day() as u8)?;
    let time = Time::from_hms_nano(
        ts.hour() as u8,
        ts.minute() as u8,
        ts.second() as u8,
        ts.nanosecond(),
    )?;
    let offset = UtcOffset::from_hms(ts.tz_hour_offset() as i8, ts.tz_minute_offset() as i8, 0)?;
    Ok(PrimitiveDateTime::new(date, time).assume_offset(offset))
}
