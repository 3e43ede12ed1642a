//! Dataset parser for delimited text and spreadsheet workbooks.

use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Dataset, SourceMetadata};
use super::spreadsheet;
use crate::error::{AnalystError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// File extensions the parser accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt", "xlsx", "xlsm", "xls", "ods"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use for text files (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the first row holds column names.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses uploaded files into datasets.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|e| AnalystError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.parse_bytes(&contents, &file_name)
    }

    /// Parse raw contents; the file name decides between text and workbook.
    pub fn parse_bytes(&self, contents: &[u8], file_name: &str) -> Result<(Dataset, SourceMetadata)> {
        let extension = extension_of(file_name).ok_or_else(|| unsupported(file_name))?;

        let (dataset, format) = match extension.as_str() {
            "csv" | "tsv" | "txt" => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(contents)?,
                };
                let dataset = self.parse_delimited(contents, delimiter)?;
                (dataset, delimited_format(delimiter).to_string())
            }
            "xlsx" | "xlsm" | "xls" | "ods" => {
                let dataset = spreadsheet::read_first_sheet(
                    contents,
                    self.config.has_header,
                    self.config.max_rows,
                )?;
                (dataset, extension)
            }
            _ => return Err(unsupported(file_name)),
        };

        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        debug!(
            file = file_name,
            format = %format,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "parsed dataset"
        );

        let metadata = SourceMetadata::new(
            file_name,
            hash,
            contents.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse delimited text with a known delimiter.
    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => record?.iter().map(|s| s.trim().to_string()).collect(),
                None => return Err(AnalystError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in records {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            return Err(AnalystError::EmptyData("No data rows found".to_string()));
        }

        let headers = if self.config.has_header {
            headers
        } else {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(AnalystError::EmptyData("No columns found".to_string()));
        }

        Ok(Dataset::from_text_rows(headers, &rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

fn unsupported(file_name: &str) -> AnalystError {
    let valid: Vec<String> = SUPPORTED_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect();
    AnalystError::UnsupportedFormat(format!("'{}' (use one of: {})", file_name, valid.join(", ")))
}

fn delimited_format(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AnalystError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab breaks ties.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
