//! Worksheet-level BIFF8 record writers.

use crate::common::binary::{WriteLe, encode_biff8_long};
use crate::ole::xls::XlsResult;
use smallvec::SmallVec;
use std::io::Write;

use super::{write_record, write_record_header};

/// Highest column outline level BIFF8 can express
pub(crate) const MAX_OUTLINE_LEVEL: u8 = 7;

/// Write a record carrying a single u16 value
fn write_u16_record<W: Write>(writer: &mut W, record_type: u16, value: u16) -> XlsResult<()> {
    write_record_header(writer, record_type, 2)?;
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write PRINTHEADERS record (row/column headings are not printed)
///
/// Record type: 0x002A, Length: 2
pub fn write_print_headers<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_u16_record(writer, 0x002A, 0)
}

/// Write PRINTGRIDLINES record (gridlines are not printed)
///
/// Record type: 0x002B, Length: 2
pub fn write_print_gridlines<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_u16_record(writer, 0x002B, 0)
}

/// Write GRIDSET record
///
/// Record type: 0x0082, Length: 2
pub fn write_gridset<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_u16_record(writer, 0x0082, 1)
}

/// Write GUTS record (outline gutter sizes and levels)
///
/// Record type: 0x0080, Length: 8
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `max_col_level` - Highest outline level among the page's columns
pub fn write_guts<W: Write>(writer: &mut W, max_col_level: u8) -> XlsResult<()> {
    let mut col_level = u16::from(max_col_level.min(MAX_OUTLINE_LEVEL));
    // GUTS stores the number of outline buttons, one more than the level
    if col_level != 0 {
        col_level += 1;
    }

    write_record_header(writer, 0x0080, 8)?;
    writer.write_all(&0u16.to_le_bytes())?; // dxRwGut
    writer.write_all(&0u16.to_le_bytes())?; // dxColGut
    writer.write_all(&0u16.to_le_bytes())?; // iLevelRwMac
    writer.write_all(&col_level.to_le_bytes())?; // iLevelColMac
    Ok(())
}

/// Write WSBOOL record (Additional Workspace Information)
///
/// Record type: 0x0081, Length: 2
///
/// Auto page breaks visible, outline summaries below and right, outline
/// symbols displayed.
pub fn write_wsbool<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_u16_record(writer, 0x0081, 0x0001 | 0x0040 | 0x0080 | 0x0400)
}

/// Write HEADER record with an empty page header
///
/// Record type: 0x0014
pub fn write_header<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record(writer, 0x0014, &encode_biff8_long("")?)
}

/// Write FOOTER record with an empty page footer
///
/// Record type: 0x0015
pub fn write_footer<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record(writer, 0x0015, &encode_biff8_long("")?)
}

/// Write HCENTER record
///
/// Record type: 0x0083, Length: 2
pub fn write_hcenter<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_u16_record(writer, 0x0083, 0)
}

/// Write VCENTER record
///
/// Record type: 0x0084, Length: 2
pub fn write_vcenter<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_u16_record(writer, 0x0084, 0)
}

/// Write the four page margin records, in inches
///
/// Record types: 0x0026 (left), 0x0027 (right), 0x0028 (top), 0x0029 (bottom)
pub fn write_margins<W: Write>(writer: &mut W) -> XlsResult<()> {
    for (record_type, margin) in [(0x0026, 0.7f64), (0x0027, 0.7), (0x0028, 0.75), (0x0029, 0.75)] {
        write_record_header(writer, record_type, 8)?;
        writer.write_all(&margin.to_le_bytes())?;
    }
    Ok(())
}

/// Write SETUP record (page setup)
///
/// Record type: 0x00A1, Length: 34
pub fn write_setup<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 36]> = SmallVec::new();
    body.put_u16(1); // iPaperSize
    body.put_u16(100); // iScale
    body.put_u16(1); // iPageStart
    body.put_u16(1); // iFitWidth
    body.put_u16(1); // iFitHeight
    body.put_u16(0x0002); // grbit: fPortrait
    body.put_u16(0x0258); // iRes
    body.put_u16(0x0258); // iVRes
    body.put_f64(0.3); // header margin
    body.put_f64(0.3); // footer margin
    body.put_u16(1); // iCopies
    write_record(writer, 0x00A1, &body)
}

/// Write DEFCOLWIDTH record
///
/// Record type: 0x0055, Length: 2
pub fn write_defcolwidth<W: Write>(writer: &mut W, width: u16) -> XlsResult<()> {
    write_u16_record(writer, 0x0055, width)
}

/// Write COLINFO record for a single column
///
/// Record type: 0x007D, Length: 12
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `col` - Column index (0-based)
/// * `width` - Width in characters
/// * `xf_index` - Column format index
/// * `level` - Outline level, clamped to 0..=7
pub fn write_colinfo<W: Write>(
    writer: &mut W,
    col: u16,
    width: u16,
    xf_index: u16,
    level: u8,
) -> XlsResult<()> {
    let options = u16::from(level.min(MAX_OUTLINE_LEVEL)) << 8;

    write_record_header(writer, 0x007D, 12)?;
    writer.write_all(&col.to_le_bytes())?; // colFirst
    writer.write_all(&col.to_le_bytes())?; // colLast
    // Width in 1/256 of a character
    writer.write_all(&width.saturating_mul(256).to_le_bytes())?;
    writer.write_all(&xf_index.to_le_bytes())?;
    writer.write_all(&options.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?; // reserved
    Ok(())
}

/// Write DIMENSIONS record (worksheet dimensions)
///
/// Record type: 0x0200, Length: 14
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `first_row` - First used row
/// * `last_row` - Last used row + 1
/// * `first_col` - First used column
/// * `last_col` - Last used column + 1
pub fn write_dimensions<W: Write>(
    writer: &mut W,
    first_row: u32,
    last_row: u32,
    first_col: u16,
    last_col: u16,
) -> XlsResult<()> {
    write_record_header(writer, 0x0200, 14)?;
    writer.write_all(&first_row.to_le_bytes())?;
    writer.write_all(&last_row.to_le_bytes())?;
    writer.write_all(&first_col.to_le_bytes())?;
    writer.write_all(&last_col.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?; // reserved
    Ok(())
}

/// Write WINDOW2 record (Worksheet view settings)
///
/// Record type: 0x023E, Length: 18
pub fn write_window2<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 18]> = SmallVec::new();
    // Gridlines, headings, zeros, default header color, outline symbols,
    // selected and paged
    body.put_u16(0x06B6);
    body.put_u16(0); // rwTop
    body.put_u16(0); // colLeft
    body.put_u16(0x0040); // icvHdr
    body.put_u16(0); // reserved
    body.put_u16(0); // wScaleSLV
    body.put_u16(100); // wScaleNormal
    body.put_u32(0);
    write_record(writer, 0x023E, &body)
}

/// Write PLV record (page layout view settings)
///
/// Record type: 0x088B, Length: 16
pub fn write_page_layout_view<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 16]> = SmallVec::new();
    body.put_u16(0x088B); // FrtHeader rt
    body.put_u16(0); // grbitFrt
    body.put_u32(0);
    body.put_u32(0);
    body.put_u16(100); // wScalePLV
    body.put_u16(0); // normal view, rulers hidden
    write_record(writer, 0x088B, &body)
}

/// Write SELECTION record with the cursor on A1
///
/// Record type: 0x001D, Length: 15
pub fn write_selection<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 15]> = SmallVec::new();
    body.put_u8(3); // pane
    body.put_u16(0); // rwAct
    body.put_u16(0); // colAct
    body.put_u16(0); // irefAct
    body.put_u16(1); // cref
    body.put_u16(0); // rwFirst
    body.put_u16(0); // rwLast
    body.put_u8(0); // colFirst
    body.put_u8(0); // colLast
    write_record(writer, 0x001D, &body)
}

/// Write SHEETPROTECTION record (all options allowed, protection off)
///
/// Record type: 0x0867, Length: 23
pub fn write_sheet_protection<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 23]> = SmallVec::new();
    body.put_u16(0x0867); // FrtHeader rt
    body.put_u32(0);
    body.put_u32(0);
    body.put_u8(0);
    body.put_u32(0x0100_0200);
    body.put_u32(0xFFFF_FFFF);
    body.put_u16(0x7FFF); // options
    body.put_u16(0);
    write_record(writer, 0x0867, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_len(buf: &[u8]) -> u16 {
        u16::from_le_bytes([buf[2], buf[3]])
    }

    #[test]
    fn test_fixed_record_lengths() {
        let cases: [(fn(&mut Vec<u8>) -> XlsResult<()>, u16); 6] = [
            (write_setup, 34),
            (write_window2, 18),
            (write_page_layout_view, 16),
            (write_selection, 15),
            (write_sheet_protection, 23),
            (write_header, 3),
        ];
        for (write, expected) in cases {
            let mut buf = Vec::new();
            write(&mut buf).unwrap();
            assert_eq!(record_len(&buf), expected);
            assert_eq!(buf.len(), 4 + expected as usize);
        }
    }

    #[test]
    fn test_write_wsbool() {
        let mut buf = Vec::new();
        write_wsbool(&mut buf).unwrap();
        assert_eq!(buf, vec![0x81, 0x00, 0x02, 0x00, 0xC1, 0x04]);
    }

    #[test]
    fn test_write_guts_levels() {
        let mut buf = Vec::new();
        write_guts(&mut buf, 0).unwrap();
        assert_eq!(&buf[10..12], &[0x00, 0x00]);

        buf.clear();
        write_guts(&mut buf, 2).unwrap();
        assert_eq!(&buf[10..12], &[0x03, 0x00]);

        buf.clear();
        write_guts(&mut buf, 12).unwrap();
        assert_eq!(&buf[10..12], &[0x08, 0x00]);
    }

    #[test]
    fn test_write_colinfo() {
        let mut buf = Vec::new();
        write_colinfo(&mut buf, 3, 10, 15, 9).unwrap();
        assert_eq!(
            buf,
            vec![
                0x7D, 0x00, 0x0C, 0x00, // header
                0x03, 0x00, 0x03, 0x00, // first, last
                0x00, 0x0A, // 10 * 256
                0x0F, 0x00, // xf
                0x00, 0x07, // level clamped to 7
                0x00, 0x00,
            ]
        );
    }

    #[test]
    fn test_write_margins() {
        let mut buf = Vec::new();
        write_margins(&mut buf).unwrap();
        assert_eq!(buf.len(), 4 * 12);
        assert_eq!(&buf[0..2], &[0x26, 0x00]);
        assert_eq!(&buf[4..12], &0.7f64.to_le_bytes());
        assert_eq!(&buf[36..38], &[0x29, 0x00]);
        assert_eq!(&buf[40..48], &0.75f64.to_le_bytes());
    }

    #[test]
    fn test_write_dimensions() {
        let mut buf = Vec::new();
        write_dimensions(&mut buf, 0, 2, 0, 2).unwrap();
        assert_eq!(
            buf,
            vec![
                0x00, 0x02, 0x0E, 0x00, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 2, 0, 0, 0
            ]
        );
    }

    #[test]
    fn test_write_sheet_protection_body() {
        let mut buf = Vec::new();
        write_sheet_protection(&mut buf).unwrap();
        assert_eq!(&buf[4..6], &[0x67, 0x08]);
        assert_eq!(&buf[15..19], &[0x00, 0x02, 0x00, 0x01]);
        assert_eq!(&buf[23..25], &[0xFF, 0x7F]);
    }
}
