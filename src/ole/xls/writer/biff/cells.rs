//! Cell record BIFF8 writers.

use crate::ole::xls::{XlsError, XlsResult};
use std::io::Write;

use super::write_record_header;

/// Convert a zero-based row index into the 16-bit field cell records carry
fn row_field(row: u32) -> XlsResult<u16> {
    u16::try_from(row).map_err(|_| XlsError::TooManyRows(row as usize + 1))
}

/// Write BLANK record (empty cell carrying only formatting)
///
/// Record type: 0x0201, Length: 6
pub fn write_blank<W: Write>(writer: &mut W, row: u32, col: u16, xf_index: u16) -> XlsResult<()> {
    let row = row_field(row)?;

    write_record_header(writer, 0x0201, 6)?;
    writer.write_all(&row.to_le_bytes())?;
    writer.write_all(&col.to_le_bytes())?;
    writer.write_all(&xf_index.to_le_bytes())?;
    Ok(())
}

/// Write LABELSST record (string cell with reference to SST)
///
/// Record type: 0x00FD, Length: 10
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `row` - Row index (0-based)
/// * `col` - Column index (0-based)
/// * `xf_index` - Cell format index
/// * `sst_index` - Index into shared string table
pub fn write_labelsst<W: Write>(
    writer: &mut W,
    row: u32,
    col: u16,
    xf_index: u16,
    sst_index: u32,
) -> XlsResult<()> {
    let row = row_field(row)?;

    write_record_header(writer, 0x00FD, 10)?;
    writer.write_all(&row.to_le_bytes())?;
    writer.write_all(&col.to_le_bytes())?;
    writer.write_all(&xf_index.to_le_bytes())?;
    writer.write_all(&sst_index.to_le_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_blank() {
        let mut buf = Vec::new();
        write_blank(&mut buf, 1, 1, 15).unwrap();
        assert_eq!(buf, vec![0x01, 0x02, 0x06, 0x00, 0x01, 0x00, 0x01, 0x00, 0x0F, 0x00]);
    }

    #[test]
    fn test_write_labelsst() {
        let mut buf = Vec::new();
        write_labelsst(&mut buf, 0, 1, 15, 7).unwrap();
        assert_eq!(buf.len(), 14);
        assert_eq!(&buf[0..4], &[0xFD, 0x00, 0x0A, 0x00]);
        assert_eq!(&buf[10..14], &7u32.to_le_bytes());
    }

    #[test]
    fn test_row_out_of_range() {
        let mut buf = Vec::new();
        let err = write_labelsst(&mut buf, 65_536, 0, 15, 0).unwrap_err();
        assert!(matches!(err, XlsError::TooManyRows(_)));
        assert!(buf.is_empty());
    }
}
