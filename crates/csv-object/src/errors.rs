use std::path::PathBuf;
use thiserror::Error;

pub type CsvObjectResult<T> = Result<T, CsvObjectError>;

#[derive(Error, Debug)]
pub enum CsvObjectError {
    #[error("File access error for {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {} as {encoding}", .path.display())]
    Encoding { path: PathBuf, encoding: String },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("You must provide as many column types as columns of data: found {found} but expected {expected}")]
    ColumnTypeCount { found: usize, expected: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Header '{name}' not found in headers {headers:?}")]
    HeaderNotFound { name: String, headers: Vec<String> },

    #[error("Column index {index} out of range for {count} columns")]
    ColumnOutOfRange { index: usize, count: usize },

    #[error("Column access requires column data; load with set_columns enabled")]
    ColumnDataNotSet,
}
