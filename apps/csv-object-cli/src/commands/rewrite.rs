use super::LoadArgs;
use crate::error::{CliError, CliResult};
use csv_object::{csv_path, write_csv, CsvObject, NO_HEADERS};
use std::path::PathBuf;
use tracing::info;

/// Load any supported source and write its rows back out as `<out_dir>/<name>.csv`
pub fn execute(path: PathBuf, out_dir: PathBuf, name: String, load: LoadArgs) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidArgument(
            "output name must not be empty".to_string(),
        ));
    }

    let options = load.to_options()?;
    let keep_headers = options.file_headers;
    let object = CsvObject::with_options(&path, options)?;

    // Generated names were never in the source, so don't invent a header line
    if keep_headers {
        write_csv(&out_dir, &name, object.headers(), object.row_data())?;
    } else {
        write_csv(&out_dir, &name, NO_HEADERS, object.row_data())?;
    }

    info!(
        source = %path.display(),
        target = %csv_path(&out_dir, &name).display(),
        rows = object.row_count(),
        "rewrote file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_rewrite_tsv_to_csv() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("input.tsv");
        fs::write(&source, "a\t\tb\n1\t2\n").unwrap();

        execute(
            source,
            dir.path().to_path_buf(),
            "output".to_string(),
            LoadArgs::default(),
        )
        .unwrap();

        let written = fs::read_to_string(dir.path().join("output.csv")).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), ["a,b", "1,2"]);
    }

    #[test]
    fn test_rewrite_without_headers() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("input.csv");
        fs::write(&source, "1,2\n3\n").unwrap();

        let load = LoadArgs {
            no_headers: true,
            ..Default::default()
        };
        execute(source, dir.path().to_path_buf(), "output".to_string(), load).unwrap();

        let written = fs::read_to_string(dir.path().join("output.csv")).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), ["1,2", "3,"]);
    }

    #[test]
    fn test_rewrite_rejects_empty_name() {
        let dir = tempdir().unwrap();
        let result = execute(
            dir.path().join("input.csv"),
            dir.path().to_path_buf(),
            String::new(),
            LoadArgs::default(),
        );
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
