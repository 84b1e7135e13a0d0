//! Error types for XLS stream encoding

use std::fmt;

use crate::common::binary::BinaryError;

/// Result type alias for XLS operations
pub type XlsResult<T> = Result<T, XlsError>;

/// Errors that can occur while encoding a BIFF8 workbook
#[derive(Debug)]
pub enum XlsError {
    /// I/O error
    Io(std::io::Error),
    /// A row holds more cells than a worksheet has columns
    TooManyColumns {
        /// Zero-based row index within the page
        row: usize,
        /// Number of cells in the row
        columns: usize,
    },
    /// A page holds more rows than a worksheet can address
    TooManyRows(usize),
    /// More worksheets than the external sheet table can reference
    TooManySheets(usize),
    /// Cell text was never added to the shared string table
    MissingSharedString(String),
    /// Text does not fit its length prefix
    StringTooLong {
        /// Length in UTF-16 code units
        length: usize,
        /// Largest representable length
        max: usize,
    },
    /// Invalid data
    InvalidData(String),
}

impl fmt::Display for XlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XlsError::Io(e) => write!(f, "I/O error: {}", e),
            XlsError::TooManyColumns { row, columns } => {
                write!(
                    f,
                    "Row {} has {} columns; a worksheet holds at most 256. Use XLSX instead.",
                    row, columns
                )
            },
            XlsError::TooManyRows(rows) => {
                write!(
                    f,
                    "Worksheet page has {} rows; a worksheet holds at most 65535",
                    rows
                )
            },
            XlsError::TooManySheets(count) => {
                write!(f, "Too many worksheets: {}", count)
            },
            XlsError::MissingSharedString(value) => {
                write!(f, "String {:?} is missing from the shared string table", value)
            },
            XlsError::StringTooLong { length, max } => {
                write!(
                    f,
                    "String of {} UTF-16 code units exceeds the limit of {}",
                    length, max
                )
            },
            XlsError::InvalidData(msg) => {
                write!(f, "Invalid data: {}", msg)
            },
        }
    }
}

impl std::error::Error for XlsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XlsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for XlsError {
    fn from(err: std::io::Error) -> Self {
        XlsError::Io(err)
    }
}

impl From<BinaryError> for XlsError {
    fn from(err: BinaryError) -> Self {
        match err {
            BinaryError::StringTooLong { length, max } => XlsError::StringTooLong { length, max },
        }
    }
}
