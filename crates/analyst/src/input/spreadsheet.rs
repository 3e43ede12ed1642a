//! Workbook reading (xlsx, xls, ods) via calamine.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::source::{CellValue, Column, Dataset};
use crate::error::{AnalystError, Result};

/// Read the first worksheet of a workbook into a dataset.
pub(crate) fn read_first_sheet(
    contents: &[u8],
    has_header: bool,
    max_rows: Option<usize>,
) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(contents.to_vec()))
        .map_err(|e| AnalystError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AnalystError::EmptyData("Workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AnalystError::Spreadsheet(format!("sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();

    let headers: Vec<String> = if has_header {
        match rows.next() {
            Some(row) => row.iter().map(|cell| header_text(cell)).collect(),
            None => return Err(AnalystError::EmptyData("No header row found".to_string())),
        }
    } else {
        (0..range.width()).map(|i| format!("column_{}", i + 1)).collect()
    };

    let limit = max_rows.unwrap_or(usize::MAX);
    let body: Vec<&[Data]> = rows.take(limit).collect();

    if body.is_empty() {
        return Err(AnalystError::EmptyData("No data rows found".to_string()));
    }
    if headers.is_empty() {
        return Err(AnalystError::EmptyData("No columns found".to_string()));
    }

    let columns = headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| {
            let name = if header.trim().is_empty() {
                format!("Unnamed: {}", index)
            } else {
                header
            };
            let values = body
                .iter()
                .map(|row| row.get(index).map(cell_value).unwrap_or(CellValue::Missing))
                .collect();
            Column::new(name, values)
        })
        .collect();

    Ok(Dataset::new(columns))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Numbers stay numeric; text goes through the same null-token rules as
/// delimited files; booleans and dates are categorical text.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(n) if n.is_finite() => CellValue::Number(*n),
        Data::Float(_) | Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => match CellValue::parse(s) {
            CellValue::Number(_) => CellValue::Text(s.clone()),
            other => other,
        },
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}
