//! Unified error types for csv2xls.
//!
//! Format-level errors (`OleError`, `XlsError`) are folded into this type by the
//! conversions in the sibling module.
use thiserror::Error;

use crate::ole::OleError;
use crate::ole::xls::XlsError;

/// Main error type for csv2xls operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Delimiter option is not a single ASCII character
    #[error("Invalid delimiter {0:?}: csv delimiter must be one character string")]
    InvalidDelimiter(String),

    /// Column width or outline level option could not be applied
    #[error("Invalid column setting: {0}")]
    InvalidColumnSetting(String),

    /// Spreadsheet payload could not be encoded
    #[error("XLS error: {0}")]
    Xls(XlsError),

    /// Compound file container could not be laid out
    #[error("OLE error: {0}")]
    Ole(OleError),
}

/// Result type for csv2xls operations.
pub type Result<T> = std::result::Result<T, Error>;
