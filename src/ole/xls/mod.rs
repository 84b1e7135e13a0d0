//! Legacy Excel (.xls) workbook stream encoding
//!
//! Produces the BIFF8 (Excel 97-2003) `Workbook` stream that the compound
//! file writer stores inside the OLE container.

/// Error types for XLS encoding
mod error;

/// BIFF8 workbook writer
pub mod writer;

pub use error::{XlsError, XlsResult};
pub use writer::{ColumnFormat, ColumnSettings, SharedStringTable, WorksheetPage};
