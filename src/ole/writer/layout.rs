//! Sector budget of a compound file
//!
//! The FAT must describe every sector in the file, its own sectors and the
//! DIFAT sectors included, while the DIFAT only exists once the FAT outgrows
//! the 109 slots of the header. [`compute_layout`] resolves both counts as a
//! fixed point before any sector is allocated.

use super::super::consts::{ENTRIES_PER_SECTOR, HEADER_DIFAT_SLOTS};

/// FAT sector ids one DIFAT sector holds; the last slot links the next one
const DIFAT_IDS_PER_SECTOR: usize = ENTRIES_PER_SECTOR - 1;

/// Sector counts of every region of the file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub minifat_sectors: usize,
    pub ministream_sectors: usize,
    pub stream_sectors: usize,
    pub directory_sectors: usize,
    pub fat_sectors: usize,
    pub difat_sectors: usize,
}

impl Layout {
    /// Sectors holding data, i.e. everything except the FAT and DIFAT
    pub fn data_sectors(&self) -> usize {
        self.minifat_sectors + self.ministream_sectors + self.stream_sectors + self.directory_sectors
    }

    /// Every sector after the header
    pub fn total_sectors(&self) -> usize {
        self.data_sectors() + self.fat_sectors + self.difat_sectors
    }
}

/// Resolve the FAT and DIFAT sector counts for the given data regions
pub fn compute_layout(
    minifat_sectors: usize,
    ministream_sectors: usize,
    stream_sectors: usize,
    directory_sectors: usize,
) -> Layout {
    let mut layout = Layout {
        minifat_sectors,
        ministream_sectors,
        stream_sectors,
        directory_sectors,
        fat_sectors: 0,
        difat_sectors: 0,
    };

    // Both counts only grow, so this settles after a few rounds
    loop {
        let fat_sectors = layout.total_sectors().div_ceil(ENTRIES_PER_SECTOR);
        let difat_sectors = fat_sectors
            .saturating_sub(HEADER_DIFAT_SLOTS)
            .div_ceil(DIFAT_IDS_PER_SECTOR);

        if fat_sectors == layout.fat_sectors && difat_sectors == layout.difat_sectors {
            break;
        }
        layout.fat_sectors = fat_sectors;
        layout.difat_sectors = difat_sectors;
    }

    log::debug!("compound file layout: {:?}", layout);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_file() {
        let layout = compute_layout(1, 1, 0, 1);
        assert_eq!(layout.fat_sectors, 1);
        assert_eq!(layout.difat_sectors, 0);
        assert_eq!(layout.total_sectors(), 4);
    }

    #[test]
    fn test_fat_counts_itself() {
        // 127 data sectors plus one FAT sector fill a FAT sector exactly
        assert_eq!(compute_layout(0, 0, 126, 1).fat_sectors, 1);
        // One more data sector needs a second FAT sector
        assert_eq!(compute_layout(0, 0, 127, 1).fat_sectors, 2);
    }

    #[test]
    fn test_difat_threshold() {
        // 109 FAT sectors describe up to 109 * 128 sectors
        let layout = compute_layout(0, 0, 109 * 128 - 109 - 1, 1);
        assert_eq!(layout.fat_sectors, 109);
        assert_eq!(layout.difat_sectors, 0);

        let layout = compute_layout(0, 0, 109 * 128 - 109, 1);
        assert_eq!(layout.fat_sectors, 110);
        assert_eq!(layout.difat_sectors, 1);
    }

    #[test]
    fn test_fixed_point_holds() {
        for data in [0usize, 1, 500, 14_000, 40_000, 250_000] {
            let layout = compute_layout(0, 0, data, 1);
            let total = layout.total_sectors();
            assert_eq!(layout.fat_sectors, total.div_ceil(ENTRIES_PER_SECTOR));
            assert_eq!(
                layout.difat_sectors,
                layout
                    .fat_sectors
                    .saturating_sub(HEADER_DIFAT_SLOTS)
                    .div_ceil(DIFAT_IDS_PER_SECTOR)
            );
        }
    }
}
