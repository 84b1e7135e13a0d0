/// Constants for the compound file and property set formats
pub mod consts;

/// Error type for compound file construction
mod error;

/// SummaryInformation property set encoding
pub mod property_set;

/// Compound file writer
pub mod writer;

/// Legacy Excel (.xls) workbook stream encoding
pub mod xls;

pub use error::OleError;
pub use property_set::{DocumentProperties, encode_summary_information, unix_to_filetime};
