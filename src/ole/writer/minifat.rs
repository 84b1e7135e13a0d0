//! MiniFAT (Mini File Allocation Table) generation for compound files
//!
//! Streams smaller than 4096 bytes live in the mini stream, a sequence of
//! 64-byte mini sectors stored inside the root entry's big-sector data. The
//! MiniFAT links those mini sectors the way the FAT links big sectors.

use super::super::consts::*;

/// MiniFAT builder for small stream allocation
#[derive(Debug, Default)]
pub struct MiniFatBuilder {
    /// The MiniFAT table (maps mini sector ID to next mini sector in chain)
    minifat: Vec<u32>,
    /// Ministream data (concatenated small streams)
    ministream_data: Vec<u8>,
}

impl MiniFatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a small stream to the mini stream
    ///
    /// # Returns
    ///
    /// * `u32` - The starting mini sector, or ENDOFCHAIN for an empty stream
    pub fn allocate_mini_chain(&mut self, data: &[u8]) -> u32 {
        if data.is_empty() {
            return ENDOFCHAIN;
        }

        let num_mini_sectors = data.len().div_ceil(MINI_SECTOR_SIZE);
        let start_mini_sector = self.minifat.len() as u32;

        for i in 1..num_mini_sectors {
            self.minifat.push(start_mini_sector + i as u32);
        }
        self.minifat.push(ENDOFCHAIN);

        // Padded to a mini sector boundary
        self.ministream_data.extend_from_slice(data);
        self.ministream_data
            .resize(self.minifat.len() * MINI_SECTOR_SIZE, 0);

        start_mini_sector
    }

    /// Get the ministream data
    pub fn ministream_data(&self) -> &[u8] {
        &self.ministream_data
    }

    /// Number of big sectors the MiniFAT occupies
    pub fn minifat_sector_count(&self) -> usize {
        self.minifat.len().div_ceil(ENTRIES_PER_SECTOR)
    }

    /// Number of big sectors the mini stream occupies
    pub fn ministream_sector_count(&self) -> usize {
        self.ministream_data.len().div_ceil(SECTOR_SIZE)
    }

    /// Serialize the MiniFAT into whole sectors, padding with FREESECT
    pub fn generate_minifat_sectors(&self) -> Vec<u8> {
        let len = self.minifat_sector_count() * SECTOR_SIZE;
        let mut out = Vec::with_capacity(len);
        for &entry in &self.minifat {
            out.extend_from_slice(&entry.to_le_bytes());
        }
        out.resize(len, 0xFF);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_mini_chain() {
        let mut minifat = MiniFatBuilder::new();
        assert_eq!(minifat.allocate_mini_chain(&[1u8; 100]), 0);
        assert_eq!(minifat.allocate_mini_chain(&[2u8; 10]), 2);

        assert_eq!(minifat.minifat, vec![1, ENDOFCHAIN, ENDOFCHAIN]);
        assert_eq!(minifat.ministream_data().len(), 3 * MINI_SECTOR_SIZE);
        assert_eq!(minifat.ministream_data()[99], 1);
        assert_eq!(minifat.ministream_data()[100], 0);
        assert_eq!(minifat.ministream_data()[128], 2);
    }

    #[test]
    fn test_empty_stream_takes_no_space() {
        let mut minifat = MiniFatBuilder::new();
        assert_eq!(minifat.allocate_mini_chain(&[]), ENDOFCHAIN);
        assert_eq!(minifat.minifat_sector_count(), 0);
        assert_eq!(minifat.ministream_sector_count(), 0);
        assert!(minifat.generate_minifat_sectors().is_empty());
    }

    #[test]
    fn test_sector_counts() {
        let mut minifat = MiniFatBuilder::new();
        minifat.allocate_mini_chain(&[0u8; 4095]);
        // 64 mini sectors fill eight big sectors
        assert_eq!(minifat.ministream_sector_count(), 8);
        assert_eq!(minifat.minifat_sector_count(), 1);

        let sectors = minifat.generate_minifat_sectors();
        assert_eq!(sectors.len(), SECTOR_SIZE);
        assert_eq!(&sectors[63 * 4..64 * 4], &ENDOFCHAIN.to_le_bytes());
        assert!(sectors[64 * 4..].iter().all(|&b| b == 0xFF));
    }
}
