//! Error type for compound file construction

use thiserror::Error;

/// Errors raised while laying out or emitting a compound file
#[derive(Error, Debug)]
pub enum OleError {
    /// Stream name or payload cannot be represented in the container
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Allocation bookkeeping disagrees with the emitted sectors
    #[error("Inconsistent layout: {0}")]
    Layout(String),
}
