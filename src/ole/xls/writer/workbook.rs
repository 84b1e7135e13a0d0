//! Workbook stream assembly
//!
//! The workbook stream is laid out as
//!
//! ```text
//! globals (part 1) | BOUNDSHEET per page | globals (part 3) | page 0 | page 1 | ...
//! ```
//!
//! Each BOUNDSHEET carries the absolute offset of its page's BOF record, so
//! the globals and every page are encoded into separate buffers first and the
//! offsets computed from their lengths before anything is concatenated.

use super::biff::{self, BOF_WORKBOOK_GLOBALS};
use super::sst::SharedStringTable;
use super::worksheet::{ColumnSettings, MAX_ROWS_PER_SHEET, WorksheetPage};
use crate::ole::xls::{XlsError, XlsResult};

/// Code page marking the workbook's text as UTF-16
const CODEPAGE_UTF16: u16 = 0x04B0;

/// Name of the `index`-th page: "sheet", "sheet1", "sheet2", ...
pub fn page_name(index: usize) -> String {
    if index == 0 {
        "sheet".to_string()
    } else {
        format!("sheet{index}")
    }
}

/// Cut the grid into pages of at most [`MAX_ROWS_PER_SHEET`] rows
///
/// An empty grid still yields one empty page.
pub fn split_pages<'a>(grid: &'a [Vec<String>], columns: &'a ColumnSettings) -> Vec<WorksheetPage<'a>> {
    if grid.is_empty() {
        return vec![WorksheetPage::new(page_name(0), grid, columns)];
    }

    let pages: Vec<_> = grid
        .chunks(MAX_ROWS_PER_SHEET)
        .enumerate()
        .map(|(i, rows)| WorksheetPage::new(page_name(i), rows, columns))
        .collect();
    log::debug!("{} rows split into {} page(s)", grid.len(), pages.len());
    pages
}

/// Globals written before the BOUNDSHEET records
fn encode_globals_head() -> XlsResult<Vec<u8>> {
    let mut stream = Vec::new();
    biff::write_bof(&mut stream, BOF_WORKBOOK_GLOBALS)?;
    biff::write_codepage(&mut stream, CODEPAGE_UTF16)?;
    biff::write_window1(&mut stream)?;
    biff::write_date1904(&mut stream, false)?;
    biff::write_default_font(&mut stream)?;
    biff::write_default_xfs(&mut stream)?;
    biff::write_normal_style(&mut stream)?;
    biff::write_palette(&mut stream)?;
    Ok(stream)
}

/// Globals written after the BOUNDSHEET records
fn encode_globals_tail(sheet_count: u16, sst: &SharedStringTable) -> XlsResult<Vec<u8>> {
    let mut stream = Vec::new();
    biff::write_recalc_id(&mut stream)?;
    biff::write_supbook_internal(&mut stream, sheet_count)?;
    biff::write_externsheet_internal(&mut stream, sheet_count)?;
    biff::write_sst(&mut stream, sst.strings(), sst.total_count())?;
    biff::write_eof(&mut stream)?;
    Ok(stream)
}

fn stream_offset(offset: usize) -> XlsResult<u32> {
    u32::try_from(offset)
        .map_err(|_| XlsError::InvalidData(format!("workbook stream offset {offset} exceeds 4 GiB")))
}

/// Encode the complete workbook stream for the given pages
pub fn encode_workbook(pages: &[WorksheetPage<'_>], sst: &SharedStringTable) -> XlsResult<Vec<u8>> {
    let sheet_count =
        u16::try_from(pages.len()).map_err(|_| XlsError::TooManySheets(pages.len()))?;

    let head = encode_globals_head()?;
    let tail = encode_globals_tail(sheet_count, sst)?;
    let bodies = pages
        .iter()
        .map(|page| page.encode(sst))
        .collect::<XlsResult<Vec<_>>>()?;

    let boundsheets: usize = pages
        .iter()
        .map(|page| biff::boundsheet_record_size(page.name()))
        .sum();

    let mut offset = head.len() + boundsheets + tail.len();
    let mut offsets = Vec::with_capacity(pages.len());
    for body in &bodies {
        offsets.push(stream_offset(offset)?);
        offset += body.len();
    }

    let mut stream = Vec::with_capacity(offset);
    stream.extend_from_slice(&head);
    for (page, &position) in pages.iter().zip(&offsets) {
        biff::write_boundsheet(&mut stream, position, page.name())?;
    }
    stream.extend_from_slice(&tail);
    for body in &bodies {
        stream.extend_from_slice(body);
    }

    if stream.len() != offset {
        return Err(XlsError::InvalidData(format!(
            "workbook stream is {} bytes, expected {}",
            stream.len(),
            offset
        )));
    }

    log::debug!(
        "workbook stream: {} sheet(s), {} unique strings, {} bytes",
        sheet_count,
        sst.unique_count(),
        stream.len()
    );
    Ok(stream)
}
