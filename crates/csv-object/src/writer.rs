/*!
# CSV Writer

Writes a header line (optional) and rows to `<directory>/<name>.csv`.

Rows are anything implementing [`CsvRecord`]: sequences of [`CsvField`] values
become one field per value, bare scalars become single-column rows. Writing
`[1, 2, 3]` therefore produces three lines `1`, `2` and `3`.
*/

use crate::{
    errors::{CsvObjectError, CsvObjectResult},
    value::CellValue,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Header list meaning "write no header line"
pub const NO_HEADERS: &[&str] = &[];

/// A value written as a single CSV field.
///
/// Floats keep their decimal point (`1.0`) and booleans are `True`/`False`,
/// whether written alone or as part of a sequence.
pub trait CsvField {
    fn field(&self) -> String;
}

macro_rules! display_field {
    ($($t:ty),* $(,)?) => {
        $(
            impl CsvField for $t {
                fn field(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, char, str, String, CellValue);

impl CsvField for bool {
    fn field(&self) -> String {
        CellValue::Bool(*self).to_string()
    }
}

impl CsvField for f64 {
    fn field(&self) -> String {
        CellValue::Float(*self).to_string()
    }
}

impl CsvField for f32 {
    fn field(&self) -> String {
        CellValue::Float(f64::from(*self)).to_string()
    }
}

impl<T: CsvField + ?Sized> CsvField for &T {
    fn field(&self) -> String {
        (**self).field()
    }
}

/// A value that can be written as one CSV row
pub trait CsvRecord {
    fn fields(&self) -> Vec<String>;
}

macro_rules! scalar_record {
    ($($t:ty),* $(,)?) => {
        $(
            impl CsvRecord for $t {
                fn fields(&self) -> Vec<String> {
                    vec![self.field()]
                }
            }
        )*
    };
}

scalar_record!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, String, &str,
    &String, CellValue, &CellValue,
);

impl<T: CsvField> CsvRecord for Vec<T> {
    fn fields(&self) -> Vec<String> {
        self.iter().map(CsvField::field).collect()
    }
}

impl<T: CsvField> CsvRecord for &Vec<T> {
    fn fields(&self) -> Vec<String> {
        self.iter().map(CsvField::field).collect()
    }
}

impl<T: CsvField> CsvRecord for &[T] {
    fn fields(&self) -> Vec<String> {
        self.iter().map(CsvField::field).collect()
    }
}

impl<T: CsvField, const N: usize> CsvRecord for [T; N] {
    fn fields(&self) -> Vec<String> {
        self.iter().map(CsvField::field).collect()
    }
}

/// Path the writer uses for `name` inside `directory`
pub fn csv_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{}.csv", name))
}

/// Create or overwrite `<directory>/<name>.csv`.
///
/// The header line is only written when `headers` is non-empty; rows are
/// written in iteration order, one line each.
pub fn write_csv<P, H, I, R>(directory: P, name: &str, headers: &[H], rows: I) -> CsvObjectResult<()>
where
    P: AsRef<Path>,
    H: AsRef<str>,
    I: IntoIterator<Item = R>,
    R: CsvRecord,
{
    let path = csv_path(directory.as_ref(), name);
    let file = File::create(&path).map_err(|source| CsvObjectError::FileAccess {
        path: path.clone(),
        source,
    })?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    if !headers.is_empty() {
        wtr.write_record(headers.iter().map(AsRef::<str>::as_ref))?;
    }

    let mut written = 0usize;
    for row in rows {
        wtr.write_record(row.fields())?;
        written += 1;
    }

    wtr.flush()?;
    debug!(path = %path.display(), rows = written, "wrote csv");
    Ok(())
}
