use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::backend::{CellValue, RowCursor};
use crate::error::OrasqlError;

/// Longest sheet name Excel accepts.
const MAX_SHEET_NAME: usize = 31;

const HEADER_COLOR: &str = "FFFF0000";

/// Where spreadsheet output goes: `path.xlsx` or `path.xlsx:SheetName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookTarget {
    pub path: PathBuf,
    /// `None` means a name is generated from the current time.
    pub sheet: Option<String>,
}

/// Parse an `--output-file` value for xls output.
///
/// - `report.xlsx` → new sheet with a generated name
/// - `report.xlsx:Daily` → sheet `Daily`, replaced if it already exists
/// - any other extension → error
pub fn parse_workbook_target(value: &str) -> Result<WorkbookTarget, OrasqlError> {
    let (path, sheet) = match value.rsplit_once(':') {
        Some((path, sheet)) if has_xlsx_extension(Path::new(path)) => (path, Some(sheet)),
        _ => (value, None),
    };

    if !has_xlsx_extension(Path::new(path)) {
        return Err(OrasqlError::config(format!(
            "xls output needs a .xlsx file (optionally path.xlsx:SheetName), got \"{value}\""
        )));
    }

    if let Some(name) = sheet {
        validate_sheet_name(name)?;
    }

    Ok(WorkbookTarget {
        path: PathBuf::from(path),
        sheet: sheet.map(str::to_string),
    })
}

fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}

pub fn validate_sheet_name(name: &str) -> Result<(), OrasqlError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_SHEET_NAME {
        return Err(OrasqlError::config(format!(
            "sheet name must be 1 to {MAX_SHEET_NAME} characters, got {len}"
        )));
    }
    if let Some(bad) = name.chars().find(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\')) {
        return Err(OrasqlError::config(format!(
            "sheet name \"{name}\" contains forbidden character '{bad}'"
        )));
    }
    Ok(())
}

/// Sheet name derived from a timestamp: `DDMMYYYY_HHMMSS`.
pub fn default_sheet_name(now: OffsetDateTime) -> String {
    now.format(format_description!("[day][month][year]_[hour][minute][second]"))
        .unwrap_or_else(|_| "orasql".to_string())
}

/// Write the whole result set into one sheet and save the workbook in place.
///
/// The workbook is opened if it exists and created otherwise. A sheet with
/// the same name is deleted first, so reruns replace rather than append.
/// Unlike the text modes, every row is held in the workbook until it is saved.
pub fn write_workbook<C>(cursor: &mut C, target: &WorkbookTarget) -> Result<usize, OrasqlError>
where
    C: RowCursor + ?Sized,
{
    let sheet_name = match &target.sheet {
        Some(name) => name.clone(),
        None => default_sheet_name(
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
        ),
    };

    let mut book = open_or_create(&target.path)?;

    if book.get_sheet_by_name(&sheet_name).is_some() {
        tracing::debug!("replacing existing sheet {sheet_name}");
        book.remove_sheet_by_name(&sheet_name)
            .map_err(|e| OrasqlError::workbook(format!("cannot delete sheet {sheet_name}: {e}")))?;
    }

    let sheet = book
        .new_sheet(sheet_name.as_str())
        .map_err(|e| OrasqlError::workbook(format!("cannot create sheet {sheet_name}: {e}")))?;

    write_header(sheet, cursor);

    let mut rows = 0;
    while let Some(row) = cursor.next_row()? {
        let row_num = rows + 2;
        for (i, value) in row.iter().enumerate() {
            set_cell(sheet, (column_number(i)?, row_num), value);
        }
        rows += 1;
    }

    let active = book.get_sheet_count().saturating_sub(1);
    book.set_active_sheet(active as u32);

    umya_spreadsheet::writer::xlsx::write(&book, &target.path).map_err(|e| {
        OrasqlError::workbook(format!("cannot save {}: {}", target.path.display(), e))
    })?;

    Ok(rows as usize)
}

fn open_or_create(path: &Path) -> Result<Spreadsheet, OrasqlError> {
    if !path.exists() {
        return Ok(umya_spreadsheet::new_file_empty_worksheet());
    }
    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        OrasqlError::workbook(format!(
            "cannot open {} as an xlsx workbook: {}",
            path.display(),
            e
        ))
    })
}

fn write_header<C>(sheet: &mut Worksheet, cursor: &C)
where
    C: RowCursor + ?Sized,
{
    for (i, col) in cursor.columns().iter().enumerate() {
        let coord = (i as u32 + 1, 1);
        sheet.get_cell_mut(coord).set_value(col.name.clone());
        let font = sheet.get_style_mut(coord).get_font_mut();
        font.set_bold(true);
        font.get_color_mut().set_argb(HEADER_COLOR);
    }
}

fn column_number(index: usize) -> Result<u32, OrasqlError> {
    u32::try_from(index + 1)
        .map_err(|_| OrasqlError::workbook(format!("column {index} is out of range")))
}

fn set_cell(sheet: &mut Worksheet, coord: (u32, u32), value: &CellValue) {
    match value {
        CellValue::Null => {}
        CellValue::Integer(i) => {
            sheet.get_cell_mut(coord).set_value_number(*i as f64);
        }
        CellValue::Float(f) => {
            sheet.get_cell_mut(coord).set_value_number(*f);
        }
        other => {
            sheet.get_cell_mut(coord).set_value(other.to_string());
        }
    }
}
