pub mod column;
pub mod inspect;
pub mod rewrite;

use crate::error::CliResult;
use clap::Args;
use csv_object::{ColumnTypes, LoadOptions};
use std::path::PathBuf;

/// Flags shared by every command that loads a file
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Column types: one tag for every column, or a comma-separated tag per column
    #[arg(short, long)]
    pub types: Option<String>,

    /// Treat the first line as data and generate column names
    #[arg(long)]
    pub no_headers: bool,

    /// Source encoding label (default: utf-8-sig)
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Load unparseable int/float cells as zero
    #[arg(long)]
    pub missing_to_zero: bool,

    /// Do not record or report cells that failed to convert
    #[arg(short, long)]
    pub quiet: bool,

    /// YAML file with load options; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl LoadArgs {
    pub fn to_options(&self) -> CliResult<LoadOptions> {
        let mut options = match &self.config {
            Some(path) => LoadOptions::from_yaml_file(path)?,
            None => LoadOptions::default(),
        };

        if let Some(types) = &self.types {
            options.column_types = types.parse::<ColumnTypes>()?;
        }
        if self.no_headers {
            options.file_headers = false;
        }
        if let Some(encoding) = &self.encoding {
            options.encoding = encoding.clone();
        }
        if self.missing_to_zero {
            options.missing_to_zero = true;
        }
        if self.quiet {
            options.print_warnings = false;
        }

        Ok(options)
    }
}
