use super::LoadArgs;
use crate::error::CliResult;
use csv_object::{CellValue, CsvObject};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct Summary<'a> {
    file_name: &'a str,
    headers: &'a [String],
    column_types: Option<Vec<String>>,
    rows: &'a [Vec<CellValue>],
    invalid_typed: usize,
}

/// Load a file and print what was found
pub fn execute(path: PathBuf, load: LoadArgs, json: bool) -> CliResult<()> {
    let object = CsvObject::with_options(&path, load.to_options()?)?;

    if json {
        let summary = Summary {
            file_name: object.file_name(),
            headers: object.headers(),
            column_types: object
                .column_types()
                .map(|types| types.iter().map(ToString::to_string).collect()),
            rows: object.row_data(),
            invalid_typed: object.invalid_typed().len(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", object);
    println!("Headers:");
    for (i, header) in object.headers().iter().enumerate() {
        match object.column_types() {
            Some(types) => println!("  {:>3}  {} ({})", i, header, types[i]),
            None => println!("  {:>3}  {}", i, header),
        }
    }
    println!("Untyped cells: {}", object.invalid_typed().len());

    Ok(())
}
