use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

use commands::LoadArgs;
use error::CliResult;

#[derive(Parser)]
#[command(name = "csv-object")]
#[command(about = "Load delimited text files into typed rows and columns")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a file and print its summary and headers
    Inspect {
        /// Source file (.csv, .tsv or .txt)
        path: PathBuf,

        /// Print headers, rows and counts as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Print a single column by header name or zero-based position
    Column {
        /// Source file (.csv, .tsv or .txt)
        path: PathBuf,

        /// Header name or zero-based column position
        column: String,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Load a file and write its rows back out as CSV
    Rewrite {
        /// Source file (.csv, .tsv or .txt)
        path: PathBuf,

        /// Output directory
        out_dir: PathBuf,

        /// Output file name, without the .csv extension
        name: String,

        #[command(flatten)]
        load: LoadArgs,
    },
}

fn main() -> CliResult<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { path, json, load } => commands::inspect::execute(path, load, json),

        Commands::Column { path, column, load } => commands::column::execute(path, column, load),

        Commands::Rewrite {
            path,
            out_dir,
            name,
            load,
        } => commands::rewrite::execute(path, out_dir, name, load),
    }
}
