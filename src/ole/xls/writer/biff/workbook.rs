//! Workbook-level BIFF8 record writers.

use crate::common::binary::{WriteLe, encode_biff8_short};
use crate::ole::xls::XlsResult;
use smallvec::SmallVec;
use std::io::Write;

use super::{write_record, write_record_header};

/// Number of XF records in the default table: 15 style XFs and one cell XF
const DEFAULT_XF_COUNT: usize = 16;

/// Colors 0x08..=0x3F of the workbook palette as (red, green, blue)
const PALETTE: [(u8, u8, u8); 56] = [
    (0x00, 0x00, 0x00),
    (0xFF, 0xFF, 0xFF),
    (0xFF, 0x00, 0x00),
    (0x00, 0xFF, 0x00),
    (0x00, 0x00, 0xFF),
    (0xFF, 0xFF, 0x00),
    (0xFF, 0x00, 0xFF),
    (0x00, 0xFF, 0xFF),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x00),
    (0x00, 0x00, 0x80),
    (0x80, 0x80, 0x00),
    (0x80, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0xC0, 0xC0, 0xC0),
    (0x80, 0x80, 0x80),
    (0x99, 0x99, 0xFF),
    (0x99, 0x33, 0x66),
    (0xFF, 0xFF, 0xCC),
    (0xCC, 0xFF, 0xFF),
    (0x66, 0x00, 0x66),
    (0xFF, 0x80, 0x80),
    (0x00, 0x66, 0xCC),
    (0xCC, 0xCC, 0xFF),
    (0x00, 0x00, 0x80),
    (0xFF, 0x00, 0xFF),
    (0xFF, 0xFF, 0x00),
    (0x00, 0xFF, 0xFF),
    (0x80, 0x00, 0x80),
    (0x80, 0x00, 0x00),
    (0x00, 0x80, 0x80),
    (0x00, 0x00, 0xFF),
    (0x00, 0xCC, 0xFF),
    (0xCC, 0xFF, 0xFF),
    (0xCC, 0xFF, 0xCC),
    (0xFF, 0xFF, 0x99),
    (0x99, 0xCC, 0xFF),
    (0xFF, 0x99, 0xCC),
    (0xCC, 0x99, 0xFF),
    (0xFF, 0xCC, 0x99),
    (0x33, 0x66, 0xFF),
    (0x33, 0xCC, 0xCC),
    (0x99, 0xCC, 0x00),
    (0xFF, 0xCC, 0x00),
    (0xFF, 0x99, 0x00),
    (0xFF, 0x66, 0x00),
    (0x66, 0x66, 0x99),
    (0x96, 0x96, 0x96),
    (0x00, 0x33, 0x66),
    (0x33, 0x99, 0x66),
    (0x00, 0x33, 0x00),
    (0x33, 0x33, 0x00),
    (0x99, 0x33, 0x00),
    (0x99, 0x33, 0x66),
    (0x33, 0x33, 0x99),
    (0x33, 0x33, 0x33),
];

/// Write CODEPAGE record
///
/// Record type: 0x0042
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `codepage` - Code page identifier (0x04B0 marks UTF-16 text)
pub fn write_codepage<W: Write>(writer: &mut W, codepage: u16) -> XlsResult<()> {
    write_record_header(writer, 0x0042, 2)?;
    writer.write_all(&codepage.to_le_bytes())?;
    Ok(())
}

/// Write WINDOW1 record (workbook window properties)
///
/// Record type: 0x003D, Length: 18
pub fn write_window1<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 18]> = SmallVec::new();
    body.put_u16(0); // xWn
    body.put_u16(0); // yWn
    body.put_u16(0x25BC); // dxWn
    body.put_u16(0x1572); // dyWn
    body.put_u16(0x0038); // grbit
    body.put_u16(0); // itabCur
    body.put_u16(0); // itabFirst
    body.put_u16(1); // ctabSel
    body.put_u16(0x0258); // wTabRatio
    write_record(writer, 0x003D, &body)
}

/// Write DATEMODE record
///
/// Record type: 0x0022
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `is_1904` - True for 1904 date system (Mac), false for 1900 (Windows)
pub fn write_date1904<W: Write>(writer: &mut W, is_1904: bool) -> XlsResult<()> {
    write_record_header(writer, 0x0022, 2)?;
    writer.write_all(&u16::from(is_1904).to_le_bytes())?;
    Ok(())
}

/// Write the single FONT record of the workbook: 11pt Calibri, palette color 8
///
/// Record type: 0x0031
pub fn write_default_font<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 32]> = SmallVec::new();
    body.put_u16(11 * 20); // height in twips
    body.put_u16(0); // grbit
    body.put_u16(8); // icv
    body.put_u16(0x0190); // weight (normal)
    body.put_u16(0); // sss
    body.put_u8(0); // underline
    body.put_u8(0); // family
    body.put_u8(0); // charset
    body.put_u8(0); // reserved
    body.put_bytes(&encode_biff8_short("Calibri")?);
    write_record(writer, 0x0031, &body)
}

/// Write the default XF table
///
/// Record type: 0x00E0, Length: 20
///
/// Entries 0..14 are style XFs (parent field 0xFFF5); entry 15 is the cell
/// XF every cell refers to.
pub fn write_default_xfs<W: Write>(writer: &mut W) -> XlsResult<()> {
    for i in 0..DEFAULT_XF_COUNT {
        let type_prot: u16 = if i + 1 == DEFAULT_XF_COUNT { 0x0001 } else { 0xFFF5 };

        let mut body: SmallVec<[u8; 20]> = SmallVec::new();
        body.put_u16(0); // ifnt
        body.put_u16(0); // ifmt
        body.put_u16(type_prot);
        body.put_u8(0x20); // alignment
        body.put_u8(0); // rotation
        body.put_u8(0); // indent
        body.put_u8(0xC0); // used attributes
        body.put_u32(0); // border lines
        body.put_u32(0); // border colors
        body.put_u16(1033); // fill
        write_record(writer, 0x00E0, &body)?;
    }
    Ok(())
}

/// Write the built-in Normal STYLE record
///
/// Record type: 0x0293, Length: 4
pub fn write_normal_style<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record_header(writer, 0x0293, 4)?;
    // XF index 0 with the built-in bit set
    writer.write_all(&0x8000u16.to_le_bytes())?;
    writer.write_all(&[0x00, 0xFF])?;
    Ok(())
}

/// Write PALETTE record with the 56 custom colors
///
/// Record type: 0x0092
pub fn write_palette<W: Write>(writer: &mut W) -> XlsResult<()> {
    let mut body = Vec::with_capacity(2 + PALETTE.len() * 4);
    body.put_u16(PALETTE.len() as u16);
    for &(red, green, blue) in &PALETTE {
        body.put_bytes(&[red, green, blue, 0x00]);
    }
    write_record(writer, 0x0092, &body)
}

/// Write RECALCID record with the engine identifier Excel 2007 writes
///
/// Record type: 0x01C1, Length: 8
pub fn write_recalc_id<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record_header(writer, 0x01C1, 8)?;
    writer.write_all(&0x0000_01C1u32.to_le_bytes())?;
    writer.write_all(&0x0001_E667u32.to_le_bytes())?;
    Ok(())
}

/// Write SUPBOOK record for the internal workbook.
///
/// Record type: 0x01AE
///
/// - cTab (2 bytes): number of sheets in the workbook
/// - reserved (2 bytes): MUST be 0x0401
pub fn write_supbook_internal<W: Write>(writer: &mut W, sheet_count: u16) -> XlsResult<()> {
    write_record_header(writer, 0x01AE, 4)?;
    writer.write_all(&sheet_count.to_le_bytes())?;
    writer.write_all(&0x0401u16.to_le_bytes())?;
    Ok(())
}

/// Write EXTERNSHEET record for internal workbook references.
///
/// Record type: 0x0017
///
/// One XTI entry `(0, i, i)` per sheet, all pointing at the internal
/// SUPBOOK. The body grows by six bytes per sheet and continues in CONTINUE
/// records once it passes the record size limit.
pub fn write_externsheet_internal<W: Write>(writer: &mut W, sheet_count: u16) -> XlsResult<()> {
    let mut body = Vec::with_capacity(2 + sheet_count as usize * 6);
    body.put_u16(sheet_count);
    for i in 0..sheet_count {
        body.put_u16(0); // ixSupBook
        body.put_u16(i); // itabFirst
        body.put_u16(i); // itabLast
    }
    write_record(writer, 0x0017, &body)
}

/// Size in bytes of a BOUNDSHEET record for `name`, header included
///
/// Header, position and flags, then the name's count and option bytes
/// followed by its UTF-16 code units.
pub fn boundsheet_record_size(name: &str) -> usize {
    4 + 6 + 2 + 2 * name.encode_utf16().count()
}

/// Write BOUNDSHEET8 record (worksheet metadata)
///
/// Record type: 0x0085
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `position` - Absolute stream position of BOF record for this sheet
/// * `name` - Sheet name, written as an uncompressed ShortXLUnicodeString
pub fn write_boundsheet<W: Write>(writer: &mut W, position: u32, name: &str) -> XlsResult<()> {
    let mut body: SmallVec<[u8; 32]> = SmallVec::new();
    body.put_u32(position);
    body.put_u8(0); // visible
    body.put_u8(0); // worksheet
    body.put_bytes(&encode_biff8_short(name)?);
    write_record(writer, 0x0085, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::xls::XlsError;

    #[test]
    fn test_write_window1() {
        let mut buf = Vec::new();
        write_window1(&mut buf).unwrap();
        assert_eq!(buf.len(), 4 + 18);
        assert_eq!(&buf[0..4], &[0x3D, 0x00, 0x12, 0x00]);
        assert_eq!(&buf[8..10], &[0xBC, 0x25]);
        assert_eq!(&buf[20..22], &[0x58, 0x02]);
    }

    #[test]
    fn test_write_default_font() {
        let mut buf = Vec::new();
        write_default_font(&mut buf).unwrap();
        // 14 fixed bytes + count, flags and seven UTF-16 characters
        assert_eq!(u16::from_le_bytes([buf[2], buf[3]]), 14 + 2 + 14);
        assert_eq!(&buf[4..6], &220u16.to_le_bytes());
        assert_eq!(buf[18], 7);
        assert_eq!(&buf[20..22], b"C\0");
    }

    #[test]
    fn test_write_default_xfs() {
        let mut buf = Vec::new();
        write_default_xfs(&mut buf).unwrap();
        assert_eq!(buf.len(), DEFAULT_XF_COUNT * 24);

        let style = &buf[0..24];
        assert_eq!(&style[0..4], &[0xE0, 0x00, 0x14, 0x00]);
        assert_eq!(&style[8..10], &[0xF5, 0xFF]);
        assert_eq!(&style[22..24], &1033u16.to_le_bytes());

        let cell = &buf[15 * 24..];
        assert_eq!(&cell[8..10], &[0x01, 0x00]);
    }

    #[test]
    fn test_write_palette() {
        let mut buf = Vec::new();
        write_palette(&mut buf).unwrap();
        assert_eq!(u16::from_le_bytes([buf[2], buf[3]]), 2 + 56 * 4);
        assert_eq!(&buf[4..6], &56u16.to_le_bytes());
        // Second entry is white
        assert_eq!(&buf[10..14], &[0xFF, 0xFF, 0xFF, 0x00]);
        // Last entry
        assert_eq!(&buf[buf.len() - 4..], &[0x33, 0x33, 0x33, 0x00]);
    }

    #[test]
    fn test_write_externsheet_entries() {
        let mut buf = Vec::new();
        write_externsheet_internal(&mut buf, 2).unwrap();
        assert_eq!(
            buf,
            vec![
                0x17, 0x00, 0x0E, 0x00, // header
                0x02, 0x00, // cXTI
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sheet 0
                0x00, 0x00, 0x01, 0x00, 0x01, 0x00, // sheet 1
            ]
        );
    }

    #[test]
    fn test_externsheet_continues_for_many_sheets() {
        let mut buf = Vec::new();
        write_externsheet_internal(&mut buf, 2000).unwrap();
        // 2 + 12000 body bytes need one CONTINUE record
        assert_eq!(buf.len(), 4 + 12_002 + 4);
        assert_eq!(&buf[4 + 8224..4 + 8224 + 2], &[0x3C, 0x00]);
    }

    #[test]
    fn test_write_boundsheet() {
        let mut buf = Vec::new();
        write_boundsheet(&mut buf, 0x1234, "sheet1").unwrap();
        assert_eq!(buf.len(), boundsheet_record_size("sheet1"));
        assert_eq!(&buf[0..2], &[0x85, 0x00]);
        assert_eq!(&buf[4..8], &0x1234u32.to_le_bytes());
        assert_eq!(&buf[8..12], &[0x00, 0x00, 0x06, 0x01]);
    }

    #[test]
    fn test_boundsheet_record_size_matches_written_record() {
        for name in ["sheet", "sheet1", "sheet65535", "Übersicht", "表"] {
            let mut buf = Vec::new();
            write_boundsheet(&mut buf, 0, name).unwrap();
            assert_eq!(buf.len(), boundsheet_record_size(name), "{name}");
            assert_eq!(
                u16::from_le_bytes([buf[2], buf[3]]) as usize + 4,
                boundsheet_record_size(name)
            );
        }
        assert_eq!(boundsheet_record_size("sheet"), 22);
    }

    #[test]
    fn test_boundsheet_name_too_long() {
        let mut buf = Vec::new();
        let err = write_boundsheet(&mut buf, 0, &"n".repeat(300)).unwrap_err();
        assert!(matches!(err, XlsError::StringTooLong { length: 300, .. }));
    }

    #[test]
    fn test_write_recalc_id() {
        let mut buf = Vec::new();
        write_recalc_id(&mut buf).unwrap();
        assert_eq!(
            buf,
            vec![0xC1, 0x01, 0x08, 0x00, 0xC1, 0x01, 0x00, 0x00, 0x67, 0xE6, 0x01, 0x00]
        );
    }
}
