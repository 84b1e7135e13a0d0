//! Directory generation for compound files
//!
//! The directory is a flat array of 128-byte entries. Entry 0 is the root
//! storage; its child and the children's sibling links form the tree that
//! readers walk. Entries past the last object are unallocated placeholders
//! that pad the directory to a whole sector.
//!
//! Siblings are ordered by name length first and then case-insensitively,
//! so a stream with a shorter name sits to the left of a longer one.

use super::super::consts::*;
use super::super::error::OleError;
use zerocopy::IntoBytes;
use zerocopy::little_endian::{U16, U32, U64};
use zerocopy_derive::{Immutable, IntoBytes};

/// Longest entry name in UTF-16 code units, terminator excluded
const MAX_NAME_UNITS: usize = 31;

/// On-disk directory entry layout
#[derive(Debug, IntoBytes, Immutable)]
#[repr(C)]
struct RawDirectoryEntry {
    name: [U16; 32],
    /// Name length in bytes, terminator included
    name_len: U16,
    object_type: u8,
    color: u8,
    left_sibling: U32,
    right_sibling: U32,
    child: U32,
    clsid: [u8; 16],
    state_bits: U32,
    created: U64,
    modified: U64,
    start_sector: U32,
    size: U64,
}

/// Directory entry builder
#[derive(Debug, Clone)]
pub struct DirectoryEntryBuilder {
    /// Entry name
    pub name: String,
    /// Entry type (STGTY_ROOT or STGTY_STREAM)
    pub entry_type: u8,
    /// Starting sector (mini sector for small streams)
    pub start_sector: u32,
    /// Stream size
    pub size: u64,
    /// Left sibling SID
    pub sid_left: u32,
    /// Right sibling SID
    pub sid_right: u32,
    /// Child SID
    pub sid_child: u32,
    /// CLSID (Class ID)
    pub clsid: [u8; 16],
}

impl DirectoryEntryBuilder {
    /// Create the root entry owning the mini stream
    pub fn root(start_sector: u32, size: u64) -> Self {
        Self {
            name: "Root Entry".to_string(),
            entry_type: STGTY_ROOT,
            start_sector,
            size,
            sid_left: NOSTREAM,
            sid_right: NOSTREAM,
            sid_child: NOSTREAM,
            clsid: [0; 16],
        }
    }

    /// Create a new stream entry
    pub fn stream(name: &str, start_sector: u32, size: u64) -> Self {
        Self {
            name: name.to_string(),
            entry_type: STGTY_STREAM,
            start_sector,
            size,
            sid_left: NOSTREAM,
            sid_right: NOSTREAM,
            sid_child: NOSTREAM,
            clsid: [0; 16],
        }
    }

    pub fn with_clsid(mut self, clsid: [u8; 16]) -> Self {
        self.clsid = clsid;
        self
    }

    pub fn with_child(mut self, sid: u32) -> Self {
        self.sid_child = sid;
        self
    }

    pub fn with_right_sibling(mut self, sid: u32) -> Self {
        self.sid_right = sid;
        self
    }

    /// Serialize to a 128-byte entry, stamped with `filetime` as both
    /// creation and modification time
    fn to_raw(&self, filetime: u64) -> Result<RawDirectoryEntry, OleError> {
        let units: Vec<u16> = self.name.encode_utf16().collect();
        if units.len() > MAX_NAME_UNITS {
            return Err(OleError::InvalidData(format!(
                "directory entry name {:?} exceeds {} UTF-16 code units",
                self.name, MAX_NAME_UNITS
            )));
        }

        let mut name = [U16::ZERO; 32];
        for (slot, unit) in name.iter_mut().zip(&units) {
            *slot = U16::new(*unit);
        }

        Ok(RawDirectoryEntry {
            name,
            name_len: U16::new(((units.len() + 1) * 2) as u16),
            object_type: self.entry_type,
            color: COLOR_BLACK,
            left_sibling: U32::new(self.sid_left),
            right_sibling: U32::new(self.sid_right),
            child: U32::new(self.sid_child),
            clsid: self.clsid,
            state_bits: U32::new(0),
            created: U64::new(filetime),
            modified: U64::new(filetime),
            start_sector: U32::new(self.start_sector),
            size: U64::new(self.size),
        })
    }
}

/// An unallocated directory slot
fn unallocated_entry() -> RawDirectoryEntry {
    RawDirectoryEntry {
        name: [U16::ZERO; 32],
        name_len: U16::ZERO,
        object_type: STGTY_EMPTY,
        color: 0,
        left_sibling: U32::new(NOSTREAM),
        right_sibling: U32::new(NOSTREAM),
        child: U32::new(NOSTREAM),
        clsid: [0; 16],
        state_bits: U32::ZERO,
        created: U64::ZERO,
        modified: U64::ZERO,
        start_sector: U32::ZERO,
        size: U64::ZERO,
    }
}

/// Serialize the directory, padded with unallocated entries to whole sectors
pub fn generate_directory(
    entries: &[DirectoryEntryBuilder],
    filetime: u64,
) -> Result<Vec<u8>, OleError> {
    let slots = entries.len().div_ceil(ENTRIES_PER_DIR_SECTOR).max(1) * ENTRIES_PER_DIR_SECTOR;
    let mut out = Vec::with_capacity(slots * DIRENTRY_SIZE);
    for entry in entries {
        out.extend_from_slice(entry.to_raw(filetime)?.as_bytes());
    }
    for _ in entries.len()..slots {
        out.extend_from_slice(unallocated_entry().as_bytes());
    }
    Ok(out)
}

/// Directory entries per 512-byte sector
const ENTRIES_PER_DIR_SECTOR: usize = SECTOR_SIZE / DIRENTRY_SIZE;
