//! csv2xls - convert delimited text into legacy Excel workbooks
//!
//! This library writes Excel 97-2003 (`.xls`) files from scratch: a BIFF8
//! workbook stream with one worksheet per 65,535 rows and a shared string
//! table, wrapped in an OLE2 compound file alongside a SummaryInformation
//! property set.
//!
//! # Features
//!
//! - **CSV input**: any single-character delimiter, ragged rows, quoted fields
//! - **BIFF8 encoder**: shared strings, CONTINUE splitting, automatic page split
//! - **Compound file writer**: mini stream, FAT/DIFAT, directory
//! - **Document properties**: title, subject, author, keywords, comments
//! - **Deterministic output**: the timestamp is an explicit input
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use csv2xls::{ConvertOptions, CsvOptions, DocumentProperties, convert, read_grid_from_path, write_document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = read_grid_from_path("input.csv", &CsvOptions::default())?;
//!
//! let mut options = ConvertOptions::new()
//!     .with_properties(DocumentProperties::new().with_title("Report"));
//! options.columns.set_width(0, 24);
//!
//! let bytes = convert(&grid, &options, Utc::now())?;
//! write_document("output.xls", &bytes)?;
//! # Ok(())
//! # }
//! ```

/// Common error types and binary helpers
pub mod common;

/// Delimited text input
pub mod csv;

/// OLE2 compound file, property set and BIFF8 encoders
pub mod ole;

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

pub use common::{Error, Result};
pub use crate::csv::{CsvOptions, read_grid, read_grid_from_path};
pub use ole::DocumentProperties;
pub use ole::xls::{ColumnFormat, ColumnSettings};

use ole::consts::{CLSID_EXCEL_WORKBOOK, SUMMARY_INFORMATION_STREAM, WORKBOOK_STREAM};
use ole::writer::OleWriter;
use ole::xls::SharedStringTable;
use ole::xls::writer::{encode_workbook, split_pages};
use ole::{encode_summary_information, unix_to_filetime};

/// Options for a single conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Metadata written to the SummaryInformation stream
    pub properties: DocumentProperties,
    /// Per-column width and outline level overrides
    pub columns: ColumnSettings,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(mut self, properties: DocumentProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_columns(mut self, columns: ColumnSettings) -> Self {
        self.columns = columns;
        self
    }
}

/// Encode `grid` as a complete `.xls` document
///
/// `timestamp` becomes the creation and modification time of the document
/// and of every container entry; the output is otherwise a pure function of
/// the inputs.
///
/// # Errors
///
/// Returns [`Error::Xls`] when a row has more than 256 cells or a string
/// cannot be encoded, and [`Error::Ole`] if the container layout is
/// inconsistent.
pub fn convert(grid: &[Vec<String>], options: &ConvertOptions, timestamp: DateTime<Utc>) -> Result<Vec<u8>> {
    let sst = SharedStringTable::from_grid(grid);
    let pages = split_pages(grid, &options.columns);
    let workbook = encode_workbook(&pages, &sst)?;

    let seconds = timestamp.timestamp();
    let summary = encode_summary_information(&options.properties, seconds);

    let mut writer = OleWriter::new();
    writer.set_root_clsid(CLSID_EXCEL_WORKBOOK);
    writer.set_filetime(unix_to_filetime(seconds));
    writer.create_stream(WORKBOOK_STREAM, &workbook)?;
    writer.create_stream(SUMMARY_INFORMATION_STREAM, &summary)?;
    let bytes = writer.build()?;

    log::debug!(
        "converted {} rows into {} page(s), {} bytes",
        grid.len(),
        pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Parse a `COL=WIDTH` column width override, e.g. `0=25`
pub fn parse_column_width(value: &str) -> Result<(u16, u16)> {
    let invalid = || Error::InvalidColumnSetting(format!("{value:?}, expected COL=WIDTH"));
    let (col, width) = value.split_once('=').ok_or_else(invalid)?;
    let col: u16 = col.trim().parse().map_err(|_| invalid())?;
    let width: u16 = width.trim().parse().map_err(|_| invalid())?;
    if usize::from(col) >= ole::xls::writer::MAX_COLUMNS {
        return Err(Error::InvalidColumnSetting(format!(
            "column {col} is beyond the last column ({})",
            ole::xls::writer::MAX_COLUMNS - 1
        )));
    }
    Ok((col, width))
}

/// Create `path` and write the finished document to it
pub fn write_document<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let mut file = std::fs::File::create(path.as_ref())?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
