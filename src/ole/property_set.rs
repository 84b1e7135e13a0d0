//! SummaryInformation property set writer
//!
//! Builds the `\x05SummaryInformation` stream ([MS-OLEPS]): a property set
//! header with a single section holding the document title, author and
//! related strings plus the creation and modification times.

use super::consts::{VT_FILETIME, VT_I2, VT_I4, VT_LPWSTR};
use crate::common::binary::{WriteLe, encode_utf16le};

/// FMTID_SummaryInformation, `{F29F85E0-4FF9-1068-AB91-08002B27B3D9}`
const FMTID_SUMMARY_INFORMATION: [u8; 16] = [
    0xE0, 0x85, 0x9F, 0xF2, 0xF9, 0x4F, 0x68, 0x10, 0xAB, 0x91, 0x08, 0x00, 0x2B, 0x27, 0xB3, 0xD9,
];

/// Offset of the only section: 28 byte header + one FMTID/offset pair
const SECTION_OFFSET: u32 = 0x30;

/// Code page advertised in the property set (Windows-1252)
const PROPERTY_CODEPAGE: i16 = 1252;

// Property identifiers
const PID_CODEPAGE: u32 = 0x01;
const PID_TITLE: u32 = 0x02;
const PID_SUBJECT: u32 = 0x03;
const PID_AUTHOR: u32 = 0x04;
const PID_KEYWORDS: u32 = 0x05;
const PID_COMMENTS: u32 = 0x06;
const PID_LASTAUTHOR: u32 = 0x08;
const PID_CREATE_DTM: u32 = 0x0C;
const PID_LASTSAVE_DTM: u32 = 0x0D;
const PID_SECURITY: u32 = 0x13;

/// Seconds between 1601-01-01 and 1970-01-01
const FILETIME_EPOCH_OFFSET: i64 = 134_774 * 86_400;

/// Fixed three hour shift applied to every timestamp
const FILETIME_ZONE_SHIFT: i64 = 10_800;

/// Document metadata stored in the SummaryInformation stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub comments: Option<String>,
    pub last_saved_by: Option<String>,
}

impl DocumentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    pub fn with_last_saved_by(mut self, last_saved_by: impl Into<String>) -> Self {
        self.last_saved_by = Some(last_saved_by.into());
        self
    }

    /// String properties in identifier order, empty values dropped
    fn strings(&self) -> impl Iterator<Item = (u32, &str)> {
        [
            (PID_TITLE, &self.title),
            (PID_SUBJECT, &self.subject),
            (PID_AUTHOR, &self.author),
            (PID_KEYWORDS, &self.keywords),
            (PID_COMMENTS, &self.comments),
            (PID_LASTAUTHOR, &self.last_saved_by),
        ]
        .into_iter()
        .filter_map(|(id, value)| value.as_deref().filter(|v| !v.is_empty()).map(|v| (id, v)))
    }
}

/// Convert Unix seconds to a FILETIME (100 ns ticks since 1601-01-01)
///
/// Instants before 1601 clamp to zero.
pub fn unix_to_filetime(timestamp: i64) -> u64 {
    let seconds = FILETIME_EPOCH_OFFSET
        .saturating_add(timestamp)
        .saturating_add(FILETIME_ZONE_SHIFT);
    u64::try_from(seconds).map_or(0, |s| s.saturating_mul(10_000_000))
}

/// One typed property value, serialized with its type header
enum Property<'a> {
    I2(i16),
    I4(i32),
    /// UTF-16 string. VT_LPWSTR ignores the section code page, so
    /// PID_CODEPAGE keeps advertising 1252 for readers that expect it.
    Lpwstr(&'a str),
    Filetime(u64),
}

impl Property<'_> {
    fn write(&self, out: &mut Vec<u8>) {
        match self {
            Property::I2(value) => {
                out.put_u32(u32::from(VT_I2));
                out.put_i16(*value);
                out.put_u16(0); // padding
            },
            Property::I4(value) => {
                out.put_u32(u32::from(VT_I4));
                out.put_i32(*value);
            },
            Property::Lpwstr(value) => {
                let wide = encode_utf16le(value);
                out.put_u32(u32::from(VT_LPWSTR));
                // Character count includes the terminator
                out.put_u32((wide.len() / 2) as u32 + 1);
                out.put_bytes(&wide);
                out.put_u16(0);
                while out.len() % 4 != 0 {
                    out.put_u8(0);
                }
            },
            Property::Filetime(value) => {
                out.put_u32(u32::from(VT_FILETIME));
                out.put_u32(*value as u32);
                out.put_u32((*value >> 32) as u32);
            },
        }
    }
}

/// Encode the SummaryInformation stream
///
/// # Arguments
///
/// * `properties` - Document metadata; empty strings are omitted
/// * `timestamp` - Unix seconds used for both creation and last save time;
///   zero omits both
pub fn encode_summary_information(properties: &DocumentProperties, timestamp: i64) -> Vec<u8> {
    let mut entries: Vec<(u32, Property<'_>)> = vec![(PID_CODEPAGE, Property::I2(PROPERTY_CODEPAGE))];
    entries.extend(
        properties
            .strings()
            .map(|(id, value)| (id, Property::Lpwstr(value))),
    );
    if timestamp != 0 {
        let filetime = unix_to_filetime(timestamp);
        entries.push((PID_CREATE_DTM, Property::Filetime(filetime)));
        entries.push((PID_LASTSAVE_DTM, Property::Filetime(filetime)));
    }
    entries.push((PID_SECURITY, Property::I4(0)));

    // Values are laid out after the (id, offset) table; offsets are relative
    // to the section start
    let table_len = 8 + entries.len() * 8;
    let mut values = Vec::new();
    let mut table = Vec::with_capacity(entries.len() * 8);
    for (id, property) in &entries {
        table.put_u32(*id);
        table.put_u32((table_len + values.len()) as u32);
        property.write(&mut values);
    }

    let mut stream = Vec::with_capacity(SECTION_OFFSET as usize + table_len + values.len());
    stream.put_u16(0xFFFE); // byte order
    stream.put_u16(0); // format version
    stream.put_u16(0x0106); // OS version
    stream.put_u16(0x0002); // OS: Win32
    stream.put_bytes(&[0u8; 16]); // CLSID
    stream.put_u32(1); // section count
    stream.put_bytes(&FMTID_SUMMARY_INFORMATION);
    stream.put_u32(SECTION_OFFSET);

    stream.put_u32((table_len + values.len()) as u32);
    stream.put_u32(entries.len() as u32);
    stream.put_bytes(&table);
    stream.put_bytes(&values);

    log::trace!(
        "summary information: {} properties, {} bytes",
        entries.len(),
        stream.len()
    );
    stream
}
