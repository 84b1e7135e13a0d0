//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type. I/O failures keep their original
//! `std::io::Error` so callers can inspect the error kind.

use super::types::Error;
use crate::ole::OleError;
use crate::ole::xls::XlsError;

impl From<OleError> for Error {
    fn from(err: OleError) -> Self {
        Error::Ole(err)
    }
}

impl From<XlsError> for Error {
    fn from(err: XlsError) -> Self {
        match err {
            XlsError::Io(e) => Error::Io(e),
            other => Error::Xls(other),
        }
    }
}
