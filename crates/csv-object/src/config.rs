use crate::{
    column_types::ColumnTypes,
    errors::{CsvObjectError, CsvObjectResult},
    source::DEFAULT_ENCODING,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Options controlling how a file is loaded into a [`crate::CsvObject`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    /// Types to coerce cells to; absent keeps every cell a string
    pub column_types: ColumnTypes,

    /// Whether to build the column-major view (required for column access)
    pub set_columns: bool,

    /// Whether the first record holds the column names
    pub file_headers: bool,

    /// Encoding label of the source file
    pub encoding: String,

    /// Replace unparseable int/float cells with zero instead of keeping the string
    pub missing_to_zero: bool,

    /// Record failed coercions and report them once loading is done
    pub print_warnings: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            column_types: ColumnTypes::Absent,
            set_columns: false,
            file_headers: true,
            encoding: DEFAULT_ENCODING.to_string(),
            missing_to_zero: false,
            print_warnings: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_types(mut self, column_types: impl Into<ColumnTypes>) -> Self {
        self.column_types = column_types.into();
        self
    }

    pub fn with_set_columns(mut self, set_columns: bool) -> Self {
        self.set_columns = set_columns;
        self
    }

    pub fn with_file_headers(mut self, file_headers: bool) -> Self {
        self.file_headers = file_headers;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_missing_to_zero(mut self, missing_to_zero: bool) -> Self {
        self.missing_to_zero = missing_to_zero;
        self
    }

    pub fn with_print_warnings(mut self, print_warnings: bool) -> Self {
        self.print_warnings = print_warnings;
        self
    }

    /// Parse options from YAML; omitted keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> CsvObjectResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| CsvObjectError::Config(format!("Invalid load options: {}", e)))
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> CsvObjectResult<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| CsvObjectError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }
}
