//! FAT (File Allocation Table) generation for compound files
//!
//! The FAT maps sector numbers to the next sector in a chain, enabling
//! variable-length streams to be stored in the compound file.
//!
//! - Regular sectors use positive chain values
//! - FAT sectors are marked with FATSECT (0xFFFFFFFD)
//! - DIFAT sectors are marked with DIFSECT (0xFFFFFFFC)
//! - End of chain is marked with ENDOFCHAIN (0xFFFFFFFE)
//! - Unused entries of the last FAT sector hold FREESECT (0xFFFFFFFF)
//!
//! Sectors are handed out strictly in order, so every chain is contiguous.

use super::super::consts::*;
use super::super::error::OleError;

/// FAT builder for sector allocation
#[derive(Debug, Default)]
pub struct FatBuilder {
    /// The FAT table (maps sector ID to next sector in chain)
    fat: Vec<u32>,
    /// Allocated chains as (start sector, sector count)
    chains: Vec<(u32, usize)>,
}

impl FatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sector to be handed out
    fn next_sector(&self) -> u32 {
        self.fat.len() as u32
    }

    /// Allocate a chain of sectors for `size` bytes
    ///
    /// # Returns
    ///
    /// * `u32` - The starting sector of the allocated chain, or ENDOFCHAIN if empty
    pub fn allocate_chain(&mut self, size: usize) -> u32 {
        if size == 0 {
            return ENDOFCHAIN;
        }

        let num_sectors = size.div_ceil(SECTOR_SIZE);
        let start_sector = self.next_sector();

        self.fat.reserve(num_sectors);
        for i in 1..num_sectors {
            self.fat.push(start_sector + i as u32);
        }
        self.fat.push(ENDOFCHAIN);

        self.chains.push((start_sector, num_sectors));
        start_sector
    }

    /// Reserve `count` sectors marked with a special value
    ///
    /// Used for the FAT itself (`FATSECT`) and the DIFAT (`DIFSECT`).
    /// Returns the first reserved sector, or ENDOFCHAIN when `count` is 0.
    pub fn allocate_special(&mut self, count: usize, marker: u32) -> u32 {
        if count == 0 {
            return ENDOFCHAIN;
        }

        let start = self.next_sector();
        self.fat.resize(self.fat.len() + count, marker);
        start
    }

    /// Get the FAT table
    #[cfg(test)]
    pub fn fat(&self) -> &[u32] {
        &self.fat
    }

    /// Get the total number of sectors allocated
    pub fn total_sectors(&self) -> usize {
        self.fat.len()
    }

    /// Serialize the FAT into whole sectors, padding with FREESECT
    pub fn generate_fat_sectors(&self) -> Vec<u8> {
        let num_fat_sectors = self.fat.len().div_ceil(ENTRIES_PER_SECTOR);
        let mut out = Vec::with_capacity(num_fat_sectors * SECTOR_SIZE);
        for &entry in &self.fat {
            out.extend_from_slice(&entry.to_le_bytes());
        }
        out.resize(num_fat_sectors * SECTOR_SIZE, 0xFF);
        out
    }

    /// Check that every allocated chain runs for exactly its sector count
    /// and ends in ENDOFCHAIN
    pub fn validate(&self) -> Result<(), OleError> {
        for &(start, count) in &self.chains {
            let mut current = start;
            for step in 1..=count {
                let next = *self.fat.get(current as usize).ok_or_else(|| {
                    OleError::Layout(format!("chain at sector {start} leaves the FAT at {current}"))
                })?;

                if step == count {
                    if next != ENDOFCHAIN {
                        return Err(OleError::Layout(format!(
                            "chain at sector {start} does not end after {count} sectors"
                        )));
                    }
                } else if next as usize >= self.fat.len() {
                    return Err(OleError::Layout(format!(
                        "chain at sector {start} ends early at sector {current}"
                    )));
                } else {
                    current = next;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_chain() {
        let mut fat = FatBuilder::new();

        // Allocate 1024 bytes with 512-byte sectors (2 sectors)
        let start = fat.allocate_chain(1024);
        assert_eq!(start, 0);
        assert_eq!(fat.total_sectors(), 2);

        assert_eq!(fat.fat()[0], 1);
        assert_eq!(fat.fat()[1], ENDOFCHAIN);
    }

    #[test]
    fn test_chains_are_separate() {
        let mut fat = FatBuilder::new();
        assert_eq!(fat.allocate_chain(100), 0);
        assert_eq!(fat.allocate_chain(513), 1);
        assert_eq!(fat.fat(), &[ENDOFCHAIN, 2, ENDOFCHAIN]);
    }

    #[test]
    fn test_empty_chain() {
        let mut fat = FatBuilder::new();
        let start = fat.allocate_chain(0);
        assert_eq!(start, ENDOFCHAIN);
        assert_eq!(fat.total_sectors(), 0);
    }

    #[test]
    fn test_allocate_special() {
        let mut fat = FatBuilder::new();
        fat.allocate_chain(512);
        assert_eq!(fat.allocate_special(2, FATSECT), 1);
        assert_eq!(fat.allocate_special(1, DIFSECT), 3);
        assert_eq!(fat.allocate_special(0, DIFSECT), ENDOFCHAIN);
        assert_eq!(fat.fat(), &[ENDOFCHAIN, FATSECT, FATSECT, DIFSECT]);
    }

    #[test]
    fn test_generate_pads_with_freesect() {
        let mut fat = FatBuilder::new();
        fat.allocate_chain(512);
        fat.allocate_special(1, FATSECT);

        let bytes = fat.generate_fat_sectors();
        assert_eq!(bytes.len(), SECTOR_SIZE);
        assert_eq!(&bytes[0..4], &ENDOFCHAIN.to_le_bytes());
        assert_eq!(&bytes[4..8], &FATSECT.to_le_bytes());
        assert!(bytes[8..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_validate_good_fat() {
        let mut fat = FatBuilder::new();
        fat.allocate_chain(1024);
        fat.allocate_chain(5000);
        fat.allocate_special(1, FATSECT);
        assert!(fat.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_broken_chain() {
        let mut fat = FatBuilder::new();
        fat.allocate_chain(1024);
        fat.fat[0] = ENDOFCHAIN;
        assert!(matches!(fat.validate(), Err(OleError::Layout(_))));
    }
}
