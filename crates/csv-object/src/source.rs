/*!
# Source Extraction

Reads a delimited text file into a header list and raw (untyped) rows.

The format is picked from the exact file extension:
- `.txt`: whitespace-delimited, one or more spaces/tabs between tokens
- `.tsv`: tab-delimited, a run of tabs counts as one delimiter
- anything else: comma-delimited with standard CSV quoting

Blank lines in a comma-delimited file are kept as empty records, so they load
as all-empty rows. The whitespace and tab formats skip blank lines.

Encoding labels follow the WHATWG names understood by `encoding_rs`, with two
additions: `utf-8-sig` strips a leading byte-order mark, and the ASCII labels
(`ascii`, `us-ascii`, ...) reject any byte above 0x7F. Note that `latin1` and
`iso-8859-1` are windows-1252 under WHATWG rules.
*/

use crate::errors::{CsvObjectError, CsvObjectResult};
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// UTF-8 that tolerates (and drops) a leading byte-order mark
pub const DEFAULT_ENCODING: &str = "utf-8-sig";

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Prefix of generated header names
pub const PLACEHOLDER_PREFIX: &str = "Untitled_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Comma,
    Whitespace,
    Tab,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("txt") => SourceFormat::Whitespace,
            Some("tsv") => SourceFormat::Tab,
            _ => SourceFormat::Comma,
        }
    }
}

/// One parsed record and the 1-based source line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

impl SourceRecord {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    fn blank(line: usize) -> Self {
        Self::new(line, Vec::new())
    }
}

/// Headers and raw rows of a source file.
///
/// `row_lines[i]` is the source line `rows[i]` was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_lines: Vec<usize>,
}

/// Read, decode and split a source file.
///
/// With `file_headers` the first record names the columns (blank names become
/// `Untitled_<n>`); without it every record is data and all names are generated
/// from the width of the first record.
pub fn extract(path: &Path, file_headers: bool, encoding: &str) -> CsvObjectResult<Extracted> {
    let bytes = fs::read(path).map_err(|source| CsvObjectError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let text = decode(&bytes, encoding, path)?;

    let format = SourceFormat::from_path(path);
    let records = parse_records(&text, format)?;
    debug!(
        path = %path.display(),
        ?format,
        records = records.len(),
        "parsed source"
    );

    Ok(split_headers(records, file_headers))
}

// ================================================================================================
// Decoding
// ================================================================================================

/// Strictly decode `bytes` using an encoding label such as `utf-8`, `ascii`
/// or `utf-8-sig`. Malformed sequences are an error, never replaced.
pub fn decode(bytes: &[u8], label: &str, path: &Path) -> CsvObjectResult<String> {
    let decoded = match resolve_encoding(label)? {
        TextEncoding::Utf8Sig => {
            strict_decode(encoding_rs::UTF_8, bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes))
        }
        TextEncoding::Ascii => bytes
            .is_ascii()
            .then(|| strict_decode(encoding_rs::UTF_8, bytes))
            .flatten(),
        TextEncoding::Label(encoding) => strict_decode(encoding, bytes),
    };

    decoded.ok_or_else(|| CsvObjectError::Encoding {
        path: path.to_path_buf(),
        encoding: label.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TextEncoding {
    Utf8Sig,
    /// 7-bit only. WHATWG folds these labels into windows-1252.
    Ascii,
    Label(&'static Encoding),
}

fn resolve_encoding(label: &str) -> CsvObjectResult<TextEncoding> {
    match label.trim().to_ascii_lowercase().as_str() {
        "utf-8-sig" | "utf_8_sig" | "utf8-sig" => Ok(TextEncoding::Utf8Sig),
        "ascii" | "us-ascii" | "us_ascii" | "ansi_x3.4-1968" | "iso646-us" | "646" | "cp367"
        | "ibm367" | "csascii" => Ok(TextEncoding::Ascii),
        trimmed => Encoding::for_label(trimmed.as_bytes())
            .map(TextEncoding::Label)
            .ok_or_else(|| CsvObjectError::UnknownEncoding(label.to_string())),
    }
}

fn strict_decode(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

// ================================================================================================
// Record Parsing
// ================================================================================================

pub fn parse_records(text: &str, format: SourceFormat) -> CsvObjectResult<Vec<SourceRecord>> {
    match format {
        SourceFormat::Comma => comma_records(text),
        SourceFormat::Whitespace => Ok(numbered_lines(text)
            .map(|(line, content)| {
                let fields = content.split_whitespace().map(str::to_string).collect();
                SourceRecord::new(line, fields)
            })
            .filter(|record| !record.fields.is_empty())
            .collect()),
        SourceFormat::Tab => Ok(numbered_lines(text)
            .filter(|(_, content)| !content.is_empty())
            .map(|(line, content)| SourceRecord::new(line, split_tab_runs(content)))
            .collect()),
    }
}

fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, line)| (i + 1, line))
}

/// Parse comma-delimited text, keeping blank lines as empty records.
///
/// The csv reader skips blank lines and stamps a record's position before
/// skipping them, so the start line is worked out from where the reader stops
/// instead: the last line of a record is the reader's line, less one when the
/// record's `\n` terminator has already been consumed.
fn comma_records(text: &str) -> CsvObjectResult<Vec<SourceRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut next_line = 1;

    while rdr.read_record(&mut record)? {
        let position = rdr.position();
        let consumed = &text.as_bytes()[..position.byte() as usize];
        let last_line = position.line() as usize - usize::from(consumed.ends_with(b"\n"));
        let embedded: usize = record.iter().map(|field| field.matches('\n').count()).sum();
        let line = last_line - embedded;

        records.extend((next_line..line).map(SourceRecord::blank));
        records.push(SourceRecord::new(
            line,
            record.iter().map(str::to_string).collect(),
        ));
        next_line = last_line + 1;
    }

    let line_count = text.lines().count();
    records.extend((next_line..=line_count).map(SourceRecord::blank));
    Ok(records)
}

/// Split on runs of tabs. Interior empty fields collapse, but a leading or
/// trailing tab still yields an empty first or last field.
fn split_tab_runs(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split('\t').collect();
    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .filter(|(i, part)| !part.is_empty() || *i == 0 || *i == last)
        .map(|(_, part)| part.to_string())
        .collect()
}

// ================================================================================================
// Headers
// ================================================================================================

pub fn placeholder_header(position: usize) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, position)
}

pub fn split_headers(mut records: Vec<SourceRecord>, file_headers: bool) -> Extracted {
    if records.is_empty() {
        return Extracted {
            headers: Vec::new(),
            rows: Vec::new(),
            row_lines: Vec::new(),
        };
    }

    let headers = if file_headers {
        records
            .remove(0)
            .fields
            .into_iter()
            .enumerate()
            .map(|(i, header)| {
                if header.is_empty() {
                    placeholder_header(i + 1)
                } else {
                    header
                }
            })
            .collect()
    } else {
        (1..=records[0].fields.len()).map(placeholder_header).collect()
    };

    let (row_lines, rows) = records
        .into_iter()
        .map(|record| (record.line, record.fields))
        .unzip();

    Extracted {
        headers,
        rows,
        row_lines,
    }
}

// ================================================================================================
// Tests
// ================================================================================================
