//! Worksheet substream encoding
//!
//! A [`WorksheetPage`] is a slice of the input grid that fits in one BIFF8
//! worksheet. Encoding produces a complete, self-contained substream from BOF
//! to EOF whose cells refer to the workbook's [`SharedStringTable`].

use super::biff::{self, BOF_WORKSHEET, DEFAULT_CELL_XF};
use super::sst::SharedStringTable;
use crate::ole::xls::{XlsError, XlsResult};
use std::collections::BTreeMap;

/// Maximum number of rows in a BIFF8 worksheet page
pub const MAX_ROWS_PER_SHEET: usize = 65_535;

/// Maximum number of columns in a BIFF8 worksheet
pub const MAX_COLUMNS: usize = 256;

/// Column width, in characters, used when no override is configured
pub const DEFAULT_COLUMN_WIDTH: u16 = 10;

/// Widest column, in characters, BIFF8 can store
pub const MAX_COLUMN_WIDTH: u16 = 255;

/// Width written to DEFCOLWIDTH
const DEFCOLWIDTH: u16 = 8;

/// Per-column formatting override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    /// Width in characters
    pub width: u16,
    /// Outline level (0..=7)
    pub level: u8,
}

impl Default for ColumnFormat {
    fn default() -> Self {
        Self {
            width: DEFAULT_COLUMN_WIDTH,
            level: 0,
        }
    }
}

/// Column overrides shared by every page of a workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSettings {
    columns: BTreeMap<u16, ColumnFormat>,
}

impl ColumnSettings {
    /// Create settings with every column at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width of a column in characters, capped at [`MAX_COLUMN_WIDTH`]
    pub fn set_width(&mut self, col: u16, width: u16) -> &mut Self {
        self.columns.entry(col).or_default().width = width.min(MAX_COLUMN_WIDTH);
        self
    }

    /// Set the outline level of a column, capped at 7
    pub fn set_level(&mut self, col: u16, level: u8) -> &mut Self {
        self.columns.entry(col).or_default().level = level.min(biff::MAX_OUTLINE_LEVEL);
        self
    }

    /// Effective format of a column
    pub fn get(&self, col: u16) -> ColumnFormat {
        self.columns.get(&col).copied().unwrap_or_default()
    }

    /// Whether no column has an override
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One worksheet's worth of grid rows
#[derive(Debug, Clone)]
pub struct WorksheetPage<'a> {
    name: String,
    rows: &'a [Vec<String>],
    columns: &'a ColumnSettings,
}

impl<'a> WorksheetPage<'a> {
    pub fn new(name: impl Into<String>, rows: &'a [Vec<String>], columns: &'a ColumnSettings) -> Self {
        Self {
            name: name.into(),
            rows,
            columns,
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &'a [Vec<String>] {
        self.rows
    }

    /// Index of the right-most column holding a cell, or `None` when the
    /// page has no cells at all
    pub fn max_column(&self) -> Option<usize> {
        self.rows.iter().map(Vec::len).max().filter(|&len| len > 0).map(|len| len - 1)
    }

    /// Check the page against the BIFF8 row and column limits
    fn validate(&self) -> XlsResult<()> {
        if self.rows.len() > MAX_ROWS_PER_SHEET {
            return Err(XlsError::TooManyRows(self.rows.len()));
        }
        if let Some((row, cells)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() > MAX_COLUMNS)
        {
            return Err(XlsError::TooManyColumns {
                row,
                columns: cells.len(),
            });
        }
        Ok(())
    }

    /// Encode the page as a worksheet substream
    pub fn encode(&self, sst: &SharedStringTable) -> XlsResult<Vec<u8>> {
        self.validate()?;

        // Both bounds were checked above
        let max_col = self.max_column().map(|col| col as u16);
        let row_count = self.rows.len() as u32;

        let mut stream = Vec::new();

        biff::write_bof(&mut stream, BOF_WORKSHEET)?;
        biff::write_print_headers(&mut stream)?;
        biff::write_print_gridlines(&mut stream)?;
        biff::write_gridset(&mut stream)?;

        let max_level = max_col
            .map(|last| (0..=last).map(|col| self.columns.get(col).level).max().unwrap_or(0))
            .unwrap_or(0);
        biff::write_guts(&mut stream, max_level)?;
        biff::write_wsbool(&mut stream)?;
        biff::write_header(&mut stream)?;
        biff::write_footer(&mut stream)?;
        biff::write_hcenter(&mut stream)?;
        biff::write_vcenter(&mut stream)?;
        biff::write_margins(&mut stream)?;
        biff::write_setup(&mut stream)?;
        biff::write_defcolwidth(&mut stream, DEFCOLWIDTH)?;

        if let Some(last) = max_col {
            for col in 0..=last {
                let format = self.columns.get(col);
                biff::write_colinfo(&mut stream, col, format.width, DEFAULT_CELL_XF, format.level)?;
            }
        }

        let col_end = max_col.map_or(0, |last| last + 1);
        biff::write_dimensions(&mut stream, 0, row_count, 0, col_end)?;

        for (row, cells) in self.rows.iter().enumerate() {
            let row = row as u32;
            for (col, value) in cells.iter().enumerate() {
                let col = col as u16;
                if value.is_empty() {
                    biff::write_blank(&mut stream, row, col, DEFAULT_CELL_XF)?;
                } else {
                    let index = sst.index_of(value)?;
                    biff::write_labelsst(&mut stream, row, col, DEFAULT_CELL_XF, index)?;
                }
            }
        }

        biff::write_window2(&mut stream)?;
        biff::write_page_layout_view(&mut stream)?;
        biff::write_selection(&mut stream)?;
        biff::write_sheet_protection(&mut stream)?;
        biff::write_eof(&mut stream)?;

        log::trace!(
            "encoded page {:?}: {} rows, {} bytes",
            self.name,
            row_count,
            stream.len()
        );
        Ok(stream)
    }
}
