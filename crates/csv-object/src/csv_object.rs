/*!
# CSV Object

An in-memory view of one delimited text file: the header list, the row-major
data and, on request, the column-major transpose.

Loading runs in a fixed order:
1. extract headers and raw rows from the source
2. resolve the column type plan against the header count
3. pad short rows with empty strings up to the header width
4. coerce each cell, recording the ones that fall back to strings
5. transpose into columns (only with `set_columns`)
6. report every failed coercion in a single warning
*/

use crate::{
    column_types::ColumnType,
    config::LoadOptions,
    errors::{CsvObjectError, CsvObjectResult},
    source::{self, Extracted},
    value::CellValue,
};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A cell that could not be coerced and was kept as its original string.
///
/// `column` is 1-based; `row` is the 1-based line the record starts on in the
/// source, so with a header line the first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvalidTyped {
    pub column: usize,
    pub row: usize,
    pub value: String,
    pub column_type: ColumnType,
}

impl fmt::Display for InvalidTyped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {:?}, {})",
            self.column, self.row, self.value, self.column_type
        )
    }
}

/// Column selector for [`CsvObject::column`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for ColumnKey<'_> {
    fn from(index: usize) -> Self {
        ColumnKey::Index(index)
    }
}

impl<'a> From<&'a str> for ColumnKey<'a> {
    fn from(name: &'a str) -> Self {
        ColumnKey::Name(name)
    }
}

impl<'a> From<&'a String> for ColumnKey<'a> {
    fn from(name: &'a String) -> Self {
        ColumnKey::Name(name)
    }
}

#[derive(Debug, Clone)]
pub struct CsvObject {
    file_path: PathBuf,
    file_name: String,
    headers: Vec<String>,
    column_types: Option<Vec<ColumnType>>,
    row_data: Vec<Vec<CellValue>>,
    column_data: Option<Vec<Vec<CellValue>>>,
    invalid_typed: Vec<InvalidTyped>,
}

impl CsvObject {
    /// Load with default options: headers on, untyped, no column data
    pub fn open<P: AsRef<Path>>(path: P) -> CsvObjectResult<Self> {
        Self::with_options(path, LoadOptions::default())
    }

    pub fn with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> CsvObjectResult<Self> {
        let path = path.as_ref();
        let Extracted {
            headers,
            rows,
            row_lines,
        } = source::extract(path, options.file_headers, &options.encoding)?;

        let column_types = options.column_types.resolve(headers.len())?;
        let rows = pad_rows(rows, headers.len());

        let (row_data, invalid_typed) = match &column_types {
            Some(plan) => type_rows(
                rows,
                plan,
                options.missing_to_zero,
                options.print_warnings,
                &row_lines,
            ),
            None => (untyped_rows(rows), Vec::new()),
        };

        let column_data = options
            .set_columns
            .then(|| format_columns(&row_data, headers.len()));

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let object = Self {
            file_path: path.to_path_buf(),
            file_name,
            headers,
            column_types,
            row_data,
            column_data,
            invalid_typed,
        };

        debug!(
            file = %object.file_name,
            rows = object.row_count(),
            columns = object.column_count(),
            typed = object.column_types.is_some(),
            "loaded csv object"
        );

        if options.print_warnings {
            if let Some(listing) = object.invalid_typed_report() {
                warn!(
                    file = %object.file_name,
                    count = object.invalid_typed.len(),
                    "The following column-row-value-type entries were not correct so loaded as strings: {}",
                    listing
                );
            }
        }

        Ok(object)
    }

    // ============================================================================================
    // Accessors
    // ============================================================================================

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Resolved type per column, `None` if the object was loaded untyped
    pub fn column_types(&self) -> Option<&[ColumnType]> {
        self.column_types.as_deref()
    }

    pub fn row_data(&self) -> &[Vec<CellValue>] {
        &self.row_data
    }

    pub fn column_data(&self) -> Option<&[Vec<CellValue>]> {
        self.column_data.as_deref()
    }

    /// Failed coercions in the order they were encountered
    pub fn invalid_typed(&self) -> &[InvalidTyped] {
        &self.invalid_typed
    }

    pub fn row_count(&self) -> usize {
        self.row_data.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.row_data.get(index).map(Vec::as_slice)
    }

    // ============================================================================================
    // Indexed Column Access
    // ============================================================================================

    /// Position of the first header exactly equal to `name`
    pub fn index_from_headers(&self, name: &str) -> CsvObjectResult<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| CsvObjectError::HeaderNotFound {
                name: name.to_string(),
                headers: self.headers.clone(),
            })
    }

    /// A full column by zero-based position or header name.
    ///
    /// Requires the object to have been loaded with `set_columns`.
    pub fn column<'k>(&self, key: impl Into<ColumnKey<'k>>) -> CsvObjectResult<&[CellValue]> {
        let columns = self
            .column_data
            .as_ref()
            .ok_or(CsvObjectError::ColumnDataNotSet)?;

        let index = match key.into() {
            ColumnKey::Index(index) => index,
            ColumnKey::Name(name) => self.index_from_headers(name)?,
        };

        columns
            .get(index)
            .map(Vec::as_slice)
            .ok_or(CsvObjectError::ColumnOutOfRange {
                index,
                count: columns.len(),
            })
    }

    /// Every failed coercion as one sorted `[(column, row, value, type), ...]`
    /// listing, the text of the load warning. `None` when nothing failed.
    pub fn invalid_typed_report(&self) -> Option<String> {
        if self.invalid_typed.is_empty() {
            return None;
        }

        let mut records = self.invalid_typed.iter().collect::<Vec<_>>();
        records.sort();
        let listing = records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("[{}]", listing))
    }
}

impl fmt::Display for CsvObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column_data.is_some() {
            write!(
                f,
                "{}: Rows:{} by Columns:{}",
                self.file_name,
                self.row_count(),
                self.column_count()
            )
        } else {
            write!(f, "{}: Rows:{}", self.file_name, self.row_count())
        }
    }
}

// ================================================================================================
// Row Normalization & Typing
// ================================================================================================

/// Right-pad short rows with empty cells. Longer rows are left as they are.
pub(crate) fn pad_rows(rows: Vec<Vec<String>>, width: usize) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|mut row| {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row
        })
        .collect()
}

fn untyped_rows(rows: Vec<Vec<String>>) -> Vec<Vec<CellValue>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(CellValue::Str).collect())
        .collect()
}

/// Coerce every cell with its column's type.
///
/// A failed numeric cell becomes zero when `missing_to_zero` is set; any other
/// failure keeps the raw string and, with `record_invalid`, is recorded once
/// against the source line in `row_lines`. Cells past the end of the plan are
/// dropped, so every typed row is exactly `plan.len()` wide.
pub(crate) fn type_rows(
    rows: Vec<Vec<String>>,
    plan: &[ColumnType],
    missing_to_zero: bool,
    record_invalid: bool,
    row_lines: &[usize],
) -> (Vec<Vec<CellValue>>, Vec<InvalidTyped>) {
    let mut invalid_typed = Vec::new();
    let mut seen = HashSet::new();
    let mut typed_rows = Vec::with_capacity(rows.len());

    for (row, &line) in rows.into_iter().zip(row_lines) {
        let mut typed_row = Vec::with_capacity(plan.len());

        for (i, (raw, &column_type)) in row.into_iter().zip(plan).enumerate() {
            let failure = match column_type.coerce(&raw) {
                Ok(value) => {
                    typed_row.push(value);
                    continue;
                }
                Err(failure) => failure,
            };

            if missing_to_zero {
                if let Some(zero) = column_type.zero() {
                    typed_row.push(zero);
                    continue;
                }
            }

            if record_invalid {
                let record = InvalidTyped {
                    column: i + 1,
                    row: line,
                    value: failure.value,
                    column_type,
                };
                if seen.insert(record.clone()) {
                    invalid_typed.push(record);
                }
            }
            typed_row.push(CellValue::Str(raw));
        }

        typed_rows.push(typed_row);
    }

    (typed_rows, invalid_typed)
}

// ================================================================================================
// Reshape
// ================================================================================================

/// Transpose rows into `width` columns, preserving row order in each column
pub(crate) fn format_columns(rows: &[Vec<CellValue>], width: usize) -> Vec<Vec<CellValue>> {
    (0..width)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i).cloned())
                .collect()
        })
        .collect()
}

// ================================================================================================
// Tests
// ================================================================================================
