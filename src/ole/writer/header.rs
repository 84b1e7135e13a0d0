//! Compound file header generation
//!
//! Generates the 512-byte header with magic bytes, version information and
//! the locations of the FAT, MiniFAT, DIFAT and directory.

use super::super::consts::*;
use zerocopy::IntoBytes;
use zerocopy::little_endian::{U16, U32};
use zerocopy_derive::{Immutable, IntoBytes};

/// On-disk header layout
#[derive(Debug, IntoBytes, Immutable)]
#[repr(C)]
struct RawHeader {
    magic: [u8; 8],
    clsid: [u8; 16],
    minor_version: U16,
    major_version: U16,
    byte_order: U16,
    sector_shift: U16,
    mini_sector_shift: U16,
    reserved: [u8; 6],
    /// Must be 0 for 512-byte sectors
    num_dir_sectors: U32,
    num_fat_sectors: U32,
    first_dir_sector: U32,
    transaction_signature: U32,
    mini_stream_cutoff: U32,
    first_minifat_sector: U32,
    num_minifat_sectors: U32,
    first_difat_sector: U32,
    num_difat_sectors: U32,
    difat: [U32; HEADER_DIFAT_SLOTS],
}

/// Compound file header builder
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    /// First sector of directory stream
    first_dir_sector: u32,
    /// First sector of MiniFAT
    first_minifat_sector: u32,
    /// Number of MiniFAT sectors
    num_minifat_sectors: u32,
    /// First sector of DIFAT
    first_difat_sector: u32,
    /// Number of DIFAT sectors
    num_difat_sectors: u32,
    /// Number of FAT sectors
    num_fat_sectors: u32,
    /// First 109 FAT sector IDs
    difat: [u32; HEADER_DIFAT_SLOTS],
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderBuilder {
    pub fn new() -> Self {
        Self {
            first_dir_sector: ENDOFCHAIN,
            first_minifat_sector: ENDOFCHAIN,
            num_minifat_sectors: 0,
            first_difat_sector: ENDOFCHAIN,
            num_difat_sectors: 0,
            num_fat_sectors: 0,
            difat: [FREESECT; HEADER_DIFAT_SLOTS],
        }
    }

    /// Set the first directory sector
    pub fn set_first_dir_sector(&mut self, sector: u32) -> &mut Self {
        self.first_dir_sector = sector;
        self
    }

    /// Set MiniFAT information
    pub fn set_minifat(&mut self, first_sector: u32, num_sectors: u32) -> &mut Self {
        self.first_minifat_sector = first_sector;
        self.num_minifat_sectors = num_sectors;
        self
    }

    /// Set DIFAT information
    pub fn set_difat(&mut self, first_sector: u32, num_sectors: u32) -> &mut Self {
        self.first_difat_sector = first_sector;
        self.num_difat_sectors = num_sectors;
        self
    }

    /// Set the FAT sector count and the header's share of FAT sector IDs
    pub fn set_fat(&mut self, num_sectors: u32, slots: [u32; HEADER_DIFAT_SLOTS]) -> &mut Self {
        self.num_fat_sectors = num_sectors;
        self.difat = slots;
        self
    }

    /// Generate the header block
    pub fn generate(&self) -> Vec<u8> {
        let raw = RawHeader {
            magic: *MAGIC,
            clsid: [0; 16],
            minor_version: U16::new(0x003E),
            major_version: U16::new(3),
            byte_order: U16::new(0xFFFE),
            sector_shift: U16::new(9),
            mini_sector_shift: U16::new(6),
            reserved: [0; 6],
            num_dir_sectors: U32::new(0),
            num_fat_sectors: U32::new(self.num_fat_sectors),
            first_dir_sector: U32::new(self.first_dir_sector),
            transaction_signature: U32::new(0),
            mini_stream_cutoff: U32::new(MINI_STREAM_CUTOFF as u32),
            first_minifat_sector: U32::new(self.first_minifat_sector),
            num_minifat_sectors: U32::new(self.num_minifat_sectors),
            first_difat_sector: U32::new(self.first_difat_sector),
            num_difat_sectors: U32::new(self.num_difat_sectors),
            difat: self.difat.map(U32::new),
        };
        raw.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(data: &[u8], pos: usize) -> u32 {
        u32::from_le_bytes(data[pos..pos + 4].try_into().unwrap())
    }

    #[test]
    fn test_raw_header_size() {
        assert_eq!(std::mem::size_of::<RawHeader>(), HEADER_SIZE);
    }

    #[test]
    fn test_generate_header() {
        let mut slots = [FREESECT; HEADER_DIFAT_SLOTS];
        slots[0] = 7;
        let mut builder = HeaderBuilder::new();
        builder
            .set_first_dir_sector(6)
            .set_minifat(0, 1)
            .set_fat(1, slots);
        let header = builder.generate();

        assert_eq!(header.len(), HEADER_SIZE);
        assert_eq!(&header[0..8], MAGIC);
        assert_eq!(&header[24..34], &[0x3E, 0, 3, 0, 0xFE, 0xFF, 9, 0, 6, 0]);
        assert_eq!(u32_at(&header, 40), 0);
        assert_eq!(u32_at(&header, 44), 1);
        assert_eq!(u32_at(&header, 48), 6);
        assert_eq!(u32_at(&header, 56), 4096);
        assert_eq!(u32_at(&header, 60), 0);
        assert_eq!(u32_at(&header, 64), 1);
        assert_eq!(u32_at(&header, 68), ENDOFCHAIN);
        assert_eq!(u32_at(&header, 72), 0);
        assert_eq!(u32_at(&header, 76), 7);
        assert_eq!(u32_at(&header, 80), FREESECT);
        assert_eq!(u32_at(&header, 508), FREESECT);
    }
}
