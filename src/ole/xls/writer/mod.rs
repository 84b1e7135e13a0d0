//! XLS file writing module
//!
//! Turns a grid of text cells into a BIFF8 workbook stream: a shared string
//! table built over the whole grid, one worksheet substream per page of at
//! most 65,535 rows, and the workbook globals that tie them together.

/// BIFF8 record generation
pub(crate) mod biff;

/// Shared string table construction
pub mod sst;

/// Worksheet substream encoding
pub mod worksheet;

/// Workbook stream assembly
pub mod workbook;

pub use sst::SharedStringTable;
pub use workbook::{encode_workbook, page_name, split_pages};
pub use worksheet::{
    ColumnFormat, ColumnSettings, DEFAULT_COLUMN_WIDTH, MAX_COLUMN_WIDTH, MAX_COLUMNS,
    MAX_ROWS_PER_SHEET, WorksheetPage,
};
