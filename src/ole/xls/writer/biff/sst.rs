//! Shared String Table (SST) BIFF8 writer.

use crate::common::binary::{BIFF8_FLAG_UTF16, WriteLe, encode_biff8_long};
use crate::ole::xls::{XlsError, XlsResult};
use std::io::Write;

use super::{MAX_RECORD_DATA, RT_CONTINUE, write_record_header};

/// SST record type
const RT_SST: u16 = 0x00FC;

/// Smallest tail worth filling with the start of a string: length, flags and
/// one UTF-16 code unit.
const MIN_SPLIT_SPACE: usize = 5;

/// Write SST (Shared String Table) record with CONTINUE support
///
/// Record type: 0x00FC
///
/// # Arguments
///
/// * `writer` - Output writer
/// * `strings` - Unique strings in index order
/// * `cst_total` - Number of string references in the workbook
///
/// # Implementation Notes
///
/// Every string is stored as uncompressed UTF-16. A string that does not fit
/// in the current record is either moved whole to the next CONTINUE record
/// (when fewer than five bytes remain) or cut at a code unit boundary, in which
/// case the CONTINUE record starts with a repeated option flags byte.
pub fn write_sst<W: Write>(writer: &mut W, strings: &[String], cst_total: u32) -> XlsResult<()> {
    for (i, block) in pack_sst_blocks(strings, cst_total)?.iter().enumerate() {
        let record_type = if i == 0 { RT_SST } else { RT_CONTINUE };
        write_record_header(writer, record_type, block.len() as u16)?;
        writer.write_all(block)?;
    }
    Ok(())
}

/// Lay the SST body out into record-sized blocks
pub(crate) fn pack_sst_blocks(strings: &[String], cst_total: u32) -> XlsResult<Vec<Vec<u8>>> {
    let cst_unique =
        u32::try_from(strings.len()).map_err(|_| XlsError::InvalidData("SST too large".into()))?;

    let mut blocks = Vec::new();
    let mut block: Vec<u8> = Vec::with_capacity(MAX_RECORD_DATA);
    block.put_u32(cst_total);
    block.put_u32(cst_unique);

    for value in strings {
        let encoded = encode_biff8_long(value)?;
        let mut rest: &[u8] = &encoded;

        loop {
            if block.len() + rest.len() <= MAX_RECORD_DATA {
                block.extend_from_slice(rest);
                if block.len() == MAX_RECORD_DATA {
                    blocks.push(std::mem::take(&mut block));
                }
                break;
            }

            let space = MAX_RECORD_DATA - block.len();
            if space < MIN_SPLIT_SPACE {
                blocks.push(std::mem::take(&mut block));
                continue;
            }

            // The remainder carried to the next block must be whole code units
            let mut take = space;
            if (rest.len() - space) % 2 == 1 {
                take -= 1;
            }
            block.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            blocks.push(std::mem::take(&mut block));
            block.push(BIFF8_FLAG_UTF16);
        }
    }

    if !block.is_empty() {
        blocks.push(block);
    }
    Ok(blocks)
}
