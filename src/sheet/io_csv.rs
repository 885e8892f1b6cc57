// Primitives for reading CSV files.

use std::io::Read;

use csv::Reader;

use crate::sheet::{io_common::simplify_file_name, *};

/// Reads a CSV file. The name of the sheet is the name of the file.
pub fn read_csv_sheet(path: &str) -> SheetResult<(Table, String)> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let table = read_csv_table(rdr)?;
    Ok((table, simplify_file_name(path)))
}

/// All the lines are kept: the header row is part of the table.
pub fn read_csv_table<R: Read>(rdr: Reader<R>) -> SheetResult<Table> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The line numbers start at 1 to respect most conventions in the spreadsheet world
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, line);
        rows.push(line.iter().map(Cell::from).collect());
    }
    Ok(Table::new(rows))
}
