use super::LoadArgs;
use crate::error::CliResult;
use csv_object::{CellValue, ColumnKey, CsvObject};
use std::io::{self, Write};
use std::path::PathBuf;

/// Print one column, one value per line
pub fn execute(path: PathBuf, column: String, load: LoadArgs) -> CliResult<()> {
    let options = load.to_options()?.with_set_columns(true);
    let object = CsvObject::with_options(&path, options)?;

    let values = object.column(column_key(object.headers(), &column))?;
    write_values(&mut io::stdout().lock(), values)
}

/// Write each value on its own line, stopping at the first failed write
pub fn write_values<W: Write>(out: &mut W, values: &[CellValue]) -> CliResult<()> {
    for value in values {
        writeln!(out, "{}", value)?;
    }
    out.flush()?;
    Ok(())
}

/// A header name wins over a numeric position when both could apply
pub fn column_key<'a>(headers: &[String], column: &'a str) -> ColumnKey<'a> {
    if headers.iter().any(|header| header == column) {
        return ColumnKey::Name(column);
    }
    match column.parse::<usize>() {
        Ok(index) => ColumnKey::Index(index),
        Err(_) => ColumnKey::Name(column),
    }
}
