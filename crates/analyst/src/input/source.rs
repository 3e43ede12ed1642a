//! Dataset representation and source metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata about the source a dataset was read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Size of the raw contents in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, xlsx, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the source was read.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a source that has been read.
    pub fn new(
        file: impl Into<String>,
        hash: String,
        size_bytes: u64,
        format: impl Into<String>,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            file: file.into(),
            hash,
            size_bytes,
            format: format.into(),
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// A single cell of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Type a raw text cell: null tokens become `Missing`, finite numbers
    /// become `Number`, anything else stays `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_null_token(trimmed) {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Label used when the value becomes a chart category or group name.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Missing => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => s.serialize(serializer),
            CellValue::Missing => serializer.serialize_none(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// Render whole numbers without a trailing fraction.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Check if a trimmed value represents a missing/null value.
fn is_null_token(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// A named column of positionally aligned cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a numeric column from optional values (`None` is missing).
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(name, values.into_iter().map(CellValue::from).collect())
    }

    /// Build a text column from optional values (`None` is missing).
    pub fn text<'a>(name: impl Into<String>, values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self::new(name, values.into_iter().map(CellValue::from).collect())
    }

    /// True when every non-missing value is a number.
    pub fn is_numeric(&self) -> bool {
        self.values
            .iter()
            .all(|v| matches!(v, CellValue::Number(_) | CellValue::Missing))
    }

    /// Non-missing numeric values in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_number).collect()
    }

    pub fn get(&self, row: usize) -> Option<&CellValue> {
        self.values.get(row)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered sequence of named columns with positionally aligned rows.
///
/// A `Dataset` is an immutable snapshot: nothing in this crate mutates one
/// after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset from columns. Names are trimmed, blank names become
    /// `Unnamed: <index>`, and repeated names get a `.1`, `.2`, ... suffix so
    /// every name is unique.
    pub fn new(columns: Vec<Column>) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(columns.len());
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(index, mut column)| {
                let base = header_or_placeholder(column.name.trim(), index);
                let mut name = base.clone();
                let mut suffix = 1;
                while seen.contains(&name) {
                    name = format!("{}.{}", base, suffix);
                    suffix += 1;
                }
                seen.push(name.clone());
                column.name = name;
                column
            })
            .collect();

        Self { columns }
    }

    /// Create a dataset from a header row and row-major text cells.
    pub fn from_text_rows(headers: Vec<String>, rows: &[Vec<String>]) -> Self {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(index, header)| {
                let values = rows
                    .iter()
                    .map(|row| row.get(index).map(|s| CellValue::parse(s)).unwrap_or(CellValue::Missing))
                    .collect();
                Column::new(header_or_placeholder(&header, index), values)
            })
            .collect();

        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// All column names, in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (the longest column).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// The first `n` rows as JSON records keyed by column name.
    pub fn head_records(&self, n: usize) -> Vec<Map<String, Value>> {
        (0..self.row_count().min(n))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| {
                        let value = c
                            .get(row)
                            .and_then(|v| serde_json::to_value(v).ok())
                            .unwrap_or(Value::Null);
                        (c.name.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

/// Blank headers get the `Unnamed: <index>` placeholder spreadsheet tools use.
fn header_or_placeholder(header: &str, index: usize) -> String {
    if header.trim().is_empty() {
        format!("Unnamed: {}", index)
    } else {
        header.to_string()
    }
}
