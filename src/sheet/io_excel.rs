// Primitives for reading spreadsheets (Excel and OpenDocument).

use calamine::{open_workbook_auto, DataType, Range, Reader};
use chrono::{Duration, NaiveDate};

use crate::sheet::*;

/// Reads a worksheet of a spreadsheet. When no worksheet name is given, the first
/// worksheet is used. Returns the table and the name of the worksheet.
pub fn read_excel_sheet(path: &str, worksheet_name: Option<&str>) -> SheetResult<(Table, String)> {
    debug!(
        "read_excel_sheet: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    let worksheet_name = match worksheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .context(EmptyExcelSnafu { path })?,
    };
    let wrange = workbook
        .worksheet_range(&worksheet_name)
        .context(MissingWorksheetSnafu {
            worksheet_name: worksheet_name.clone(),
            path,
        })?
        .context(OpeningExcelSnafu { path })?;

    Ok((range_to_table(&wrange), worksheet_name))
}

/// The table always starts at the first cell of the worksheet, even when the
/// first rows or columns are empty.
pub fn range_to_table(wrange: &Range<DataType>) -> Table {
    let (start_row, start_col) = wrange
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    debug!(
        "range_to_table: start: {:?} size: {:?}",
        (start_row, start_col),
        wrange.get_size()
    );

    let (_, width) = wrange.get_size();
    let mut rows: Vec<Vec<Cell>> = vec![vec![Cell::Empty; start_col + width]; start_row];
    for (idx, row) in wrange.rows().enumerate() {
        let mut cells: Vec<Cell> = vec![Cell::Empty; start_col];
        for (col, cell) in row.iter().enumerate() {
            cells.push(read_cell(cell, start_row + idx + 1, start_col + col + 1));
        }
        rows.push(cells);
    }
    Table::new(rows)
}

fn read_cell(cell: &DataType, lineno: usize, colno: usize) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::String(s) => Cell::from(s.as_str()),
        DataType::Int(i) => Cell::Int(*i),
        DataType::Float(f) => Cell::Number(*f),
        DataType::Bool(b) => Cell::Bool(*b),
        DataType::DateTime(serial) => match excel_datetime(*serial) {
            Some(dt) => Cell::DateTime(dt),
            None => Cell::Number(*serial),
        },
        DataType::Error(e) => {
            warn!(
                "Cell at line {} column {} holds an error ({:?}), it is read as empty",
                lineno, colno, e
            );
            Cell::Empty
        }
    }
}

// 9999-12-31, the last date spreadsheets can hold.
const MAX_DATE_SERIAL: f64 = 2958466.0;

/// Converts a date serial number (1900 epoch) to a date and time.
/// Handles the Lotus 1-2-3 leap year bug: 1900 was not a leap year.
pub fn excel_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86400.0).round() as i64;
    let offset = if days < 60 { 1 } else { 0 };
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days + offset))?
        .checked_add_signed(Duration::seconds(seconds))
}
