/*!
# csv-object

Load a delimited text file into an object exposing its headers, its rows and
(optionally) its columns, with per-column type coercion that never aborts a
load: a cell that cannot be converted keeps its original string and is
reported once, in a single warning, after loading.

## Reading

```rust,no_run
use csv_object::{ColumnType, CsvObject, CsvObjectResult, LoadOptions};

fn example() -> CsvObjectResult<()> {
    let options = LoadOptions::new()
        .with_column_types(vec![ColumnType::Str, ColumnType::Int, ColumnType::Bool])
        .with_set_columns(true)
        .with_missing_to_zero(true);

    let people = CsvObject::with_options("people.csv", options)?;
    println!("{}", people);

    for age in people.column("age")? {
        println!("{}", age);
    }

    for record in people.invalid_typed() {
        println!("not typed: {}", record);
    }
    Ok(())
}
```

## Writing

```rust,no_run
use csv_object::{write_csv, CsvObjectResult, NO_HEADERS};

fn example() -> CsvObjectResult<()> {
    // One line per row, with a header line
    write_csv("out", "people", &["name", "age"], vec![vec!["ada", "36"]])?;

    // A flat list becomes single-column rows, without a header line
    write_csv("out", "ids", NO_HEADERS, [1, 2, 3])?;
    Ok(())
}
```

## Source Formats

The file extension picks how lines are split: `.txt` on whitespace, `.tsv`
on runs of tabs, anything else as standard comma-separated values.
*/

pub mod column_types;
pub mod config;
pub mod csv_object;
pub mod errors;
pub mod source;
pub mod value;
pub mod writer;

// Re-export main types for convenience
pub use column_types::{string_to_bool, ColumnType, ColumnTypes, ValueFormatError};
pub use config::LoadOptions;
pub use csv_object::{ColumnKey, CsvObject, InvalidTyped};
pub use errors::{CsvObjectError, CsvObjectResult};
pub use source::{SourceFormat, DEFAULT_ENCODING};
pub use value::CellValue;
pub use writer::{csv_path, write_csv, CsvField, CsvRecord, NO_HEADERS};
