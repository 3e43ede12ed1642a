//! Dataset ingestion: delimited text and spreadsheet workbooks.

mod parser;
mod source;
mod spreadsheet;

pub use parser::{Parser, ParserConfig, SUPPORTED_EXTENSIONS};
pub use source::{CellValue, Column, Dataset, SourceMetadata};
pub(crate) use source::format_number;
