//! DIFAT (Double Indirect FAT) generation for compound files
//!
//! The header stores the first 109 FAT sector IDs. Any further FAT sectors
//! are listed in DIFAT sectors: 127 FAT sector IDs followed by the ID of the
//! next DIFAT sector (ENDOFCHAIN in the last one), padded with FREESECT.

use super::super::consts::*;

/// FAT sector IDs one DIFAT sector holds
const IDS_PER_DIFAT_SECTOR: usize = ENTRIES_PER_SECTOR - 1;

/// Splits the FAT sector list between the header and DIFAT sectors
#[derive(Debug)]
pub struct DifatBuilder {
    /// All FAT sector IDs in order
    fat_sectors: Vec<u32>,
}

impl DifatBuilder {
    /// # Arguments
    ///
    /// * `first_fat_sector` - First sector of the contiguous FAT run
    /// * `fat_sector_count` - Number of FAT sectors
    pub fn new(first_fat_sector: u32, fat_sector_count: usize) -> Self {
        Self {
            fat_sectors: (0..fat_sector_count as u32).map(|i| first_fat_sector + i).collect(),
        }
    }

    /// The 109 header slots, FREESECT past the last FAT sector
    pub fn header_slots(&self) -> [u32; HEADER_DIFAT_SLOTS] {
        let mut slots = [FREESECT; HEADER_DIFAT_SLOTS];
        for (slot, &id) in slots.iter_mut().zip(&self.fat_sectors) {
            *slot = id;
        }
        slots
    }

    /// Number of DIFAT sectors required
    pub fn difat_sector_count(&self) -> usize {
        self.fat_sectors
            .len()
            .saturating_sub(HEADER_DIFAT_SLOTS)
            .div_ceil(IDS_PER_DIFAT_SECTOR)
    }

    /// Serialize the DIFAT sectors
    ///
    /// # Arguments
    ///
    /// * `first_difat_sector` - Sector of the first DIFAT sector; the rest follow contiguously
    pub fn generate_difat_sectors(&self, first_difat_sector: u32) -> Vec<u8> {
        let count = self.difat_sector_count();
        let overflow = self.fat_sectors.get(HEADER_DIFAT_SLOTS..).unwrap_or(&[]);

        let mut out = Vec::with_capacity(count * SECTOR_SIZE);
        for (i, ids) in overflow.chunks(IDS_PER_DIFAT_SECTOR).enumerate() {
            let mut entries = [FREESECT; ENTRIES_PER_SECTOR];
            entries[..ids.len()].copy_from_slice(ids);
            entries[IDS_PER_DIFAT_SECTOR] = if i + 1 == count {
                ENDOFCHAIN
            } else {
                first_difat_sector + i as u32 + 1
            };

            for entry in entries {
                out.extend_from_slice(&entry.to_le_bytes());
            }
        }
        out
    }
}
