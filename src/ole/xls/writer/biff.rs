//! BIFF record writer for XLS files
//!
//! This module provides functions to generate BIFF8 (Binary Interchange File Format)
//! records for writing XLS files. BIFF8 is the format used by Excel 97-2003.
//!
//! # BIFF Record Structure
//!
//! Each BIFF record consists of:
//! - Record type (2 bytes) - identifies the record
//! - Record length (2 bytes) - length of data in bytes
//! - Record data (variable length, at most 8224 bytes)
//!
//! Bodies longer than 8224 bytes continue in CONTINUE (0x003C) records.
//!
//! # References
//!
//! Based on Microsoft's "[MS-XLS]: Excel Binary File Format (.xls) Structure" specification.

use super::super::XlsResult;
use std::io::Write;

mod cells;
mod sst;
mod workbook;
mod worksheet;

pub(crate) use cells::{write_blank, write_labelsst};
pub(crate) use sst::write_sst;
pub(crate) use workbook::{
    boundsheet_record_size, write_boundsheet, write_codepage, write_date1904,
    write_default_font, write_default_xfs, write_externsheet_internal, write_normal_style,
    write_palette, write_recalc_id, write_supbook_internal, write_window1,
};
pub(crate) use worksheet::{
    MAX_OUTLINE_LEVEL, write_colinfo, write_defcolwidth, write_dimensions, write_footer,
    write_gridset, write_guts, write_hcenter, write_header, write_margins, write_page_layout_view,
    write_print_gridlines, write_print_headers, write_selection, write_setup,
    write_sheet_protection, write_vcenter, write_window2, write_wsbool,
};

/// Maximum number of data bytes in a single record
pub(crate) const MAX_RECORD_DATA: usize = 8224;

/// CONTINUE record type
pub(crate) const RT_CONTINUE: u16 = 0x003C;

/// BOF substream type of the workbook globals
pub(crate) const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;

/// BOF substream type of a worksheet
pub(crate) const BOF_WORKSHEET: u16 = 0x0010;

/// Index of the cell XF every cell is written with
pub(crate) const DEFAULT_CELL_XF: u16 = 15;

/// Write a BIFF record header
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `record_type` - BIFF record type (e.g., 0x0809 for BOF)
/// * `data_len` - Length of record data in bytes
#[inline]
pub(crate) fn write_record_header<W: Write>(
    writer: &mut W,
    record_type: u16,
    data_len: u16,
) -> XlsResult<()> {
    writer.write_all(&record_type.to_le_bytes())?;
    writer.write_all(&data_len.to_le_bytes())?;
    Ok(())
}

/// Write a complete record
///
/// Bodies longer than [`MAX_RECORD_DATA`] are cut into the record itself
/// followed by as many CONTINUE records as needed.
pub(crate) fn write_record<W: Write>(writer: &mut W, record_type: u16, body: &[u8]) -> XlsResult<()> {
    let mut chunks = body.chunks(MAX_RECORD_DATA);
    let first = chunks.next().unwrap_or(&[]);
    write_record_header(writer, record_type, first.len() as u16)?;
    writer.write_all(first)?;

    for chunk in chunks {
        write_record_header(writer, RT_CONTINUE, chunk.len() as u16)?;
        writer.write_all(chunk)?;
    }
    Ok(())
}

/// Write BOF record (Beginning of File)
///
/// Record type: 0x0809, Length: 16
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `substream_type` - 0x0005 for workbook globals, 0x0010 for a worksheet
pub(crate) fn write_bof<W: Write>(writer: &mut W, substream_type: u16) -> XlsResult<()> {
    write_record_header(writer, 0x0809, 16)?;
    writer.write_all(&0x0600u16.to_le_bytes())?; // BIFF8
    writer.write_all(&substream_type.to_le_bytes())?;
    writer.write_all(&0x0DBBu16.to_le_bytes())?; // build identifier
    writer.write_all(&0x07CCu16.to_le_bytes())?; // build year
    // History flags and lowest BIFF version as written by Excel 2007
    writer.write_all(&0x000100D1u32.to_le_bytes())?;
    writer.write_all(&0x00000406u32.to_le_bytes())?;
    Ok(())
}

/// Write EOF record (End of File)
///
/// Record type: 0x000A, Length: 0
pub(crate) fn write_eof<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record_header(writer, 0x000A, 0)
}
