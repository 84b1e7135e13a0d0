//! Binary emission utilities shared across formats.
//!
//! This module provides little-endian writers for fixed-width values and the
//! string encodings used by the compound file container (UTF-16LE object names)
//! and by BIFF8 records (`XLUnicodeString` and `ShortXLUnicodeString`).

use smallvec::SmallVec;

/// Binary encoding error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// String has more UTF-16 code units than its length prefix can express
    StringTooLong { length: usize, max: usize },
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::StringTooLong { length, max } => {
                write!(
                    f,
                    "String too long: {} UTF-16 code units, at most {} allowed",
                    length, max
                )
            },
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary encoding operations
pub type BinaryResult<T> = Result<T, BinaryError>;

/// Option flag byte of a BIFF8 Unicode string: characters are stored as
/// uncompressed UTF-16LE code units.
pub const BIFF8_FLAG_UTF16: u8 = 0x01;

/// Little-endian emission into a growable byte buffer.
pub trait WriteLe {
    /// Append raw bytes.
    fn put_bytes(&mut self, bytes: &[u8]);

    #[inline]
    fn put_u8(&mut self, value: u8) {
        self.put_bytes(&[value]);
    }

    #[inline]
    fn put_u16(&mut self, value: u16) {
        self.put_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn put_u32(&mut self, value: u32) {
        self.put_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn put_u64(&mut self, value: u64) {
        self.put_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn put_i16(&mut self, value: i16) {
        self.put_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn put_i32(&mut self, value: i32) {
        self.put_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn put_f64(&mut self, value: f64) {
        self.put_bytes(&value.to_le_bytes());
    }

    /// Append UTF-16 code units in little-endian order.
    fn put_utf16(&mut self, units: &[u16]) {
        for unit in units {
            self.put_u16(*unit);
        }
    }
}

impl WriteLe for Vec<u8> {
    #[inline]
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<A: smallvec::Array<Item = u8>> WriteLe for SmallVec<A> {
    #[inline]
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Encode a string as UTF-16LE bytes without a terminator.
///
/// Container object names are plain ASCII, for which this produces the
/// "wide ASCII" form: every byte followed by a zero byte.
pub fn encode_utf16le(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() * 2);
    for unit in value.encode_utf16() {
        out.put_u16(unit);
    }
    out
}

/// Encode a value as BIFF8 `ShortXLUnicodeString` data: u8 code-unit count,
/// option flags, UTF-16LE characters.
pub fn encode_biff8_short(value: &str) -> BinaryResult<Vec<u8>> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let count = u8::try_from(units.len()).map_err(|_| BinaryError::StringTooLong {
        length: units.len(),
        max: u8::MAX as usize,
    })?;

    let mut out = Vec::with_capacity(2 + units.len() * 2);
    out.put_u8(count);
    out.put_u8(BIFF8_FLAG_UTF16);
    out.put_utf16(&units);
    Ok(out)
}

/// Encode a value as BIFF8 `XLUnicodeString` data: u16 code-unit count,
/// option flags, UTF-16LE characters.
pub fn encode_biff8_long(value: &str) -> BinaryResult<Vec<u8>> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let count = u16::try_from(units.len()).map_err(|_| BinaryError::StringTooLong {
        length: units.len(),
        max: u16::MAX as usize,
    })?;

    let mut out = Vec::with_capacity(3 + units.len() * 2);
    out.put_u16(count);
    out.put_u8(BIFF8_FLAG_UTF16);
    out.put_utf16(&units);
    Ok(out)
}
