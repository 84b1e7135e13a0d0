/// Magic bytes that start every compound file
pub const MAGIC: &[u8; 8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Size of the file header in bytes
pub const HEADER_SIZE: usize = 512;

/// Size of a directory entry in bytes
pub const DIRENTRY_SIZE: usize = 128;

/// Sector size for version 3 files (512 bytes)
pub const SECTOR_SIZE: usize = 512;

/// Mini sector size (64 bytes)
pub const MINI_SECTOR_SIZE: usize = 64;

/// Streams smaller than this are stored in the mini stream
pub const MINI_STREAM_CUTOFF: usize = 4096;

/// Number of FAT sector ids stored directly in the header
pub const HEADER_DIFAT_SLOTS: usize = 109;

/// Number of u32 entries in one FAT, MiniFAT or DIFAT sector
pub const ENTRIES_PER_SECTOR: usize = SECTOR_SIZE / 4;

// Sector IDs
/// Denotes a DIFAT sector in a FAT
pub const DIFSECT: u32 = 0xFFFFFFFC; // -4
/// Denotes a FAT sector in a FAT
pub const FATSECT: u32 = 0xFFFFFFFD; // -3
/// End of a virtual stream chain
pub const ENDOFCHAIN: u32 = 0xFFFFFFFE; // -2
/// Unallocated sector
pub const FREESECT: u32 = 0xFFFFFFFF; // -1

/// Unused directory entry id
pub const NOSTREAM: u32 = 0xFFFFFFFF; // -1

// Object types in storage
/// Unallocated directory entry
pub const STGTY_EMPTY: u8 = 0;
/// Element is a stream object
pub const STGTY_STREAM: u8 = 2;
/// Element is the root storage
pub const STGTY_ROOT: u8 = 5;

// Directory entry node colours
pub const COLOR_BLACK: u8 = 1;

// Property types
pub const VT_I2: u16 = 2;
pub const VT_I4: u16 = 3;
pub const VT_LPWSTR: u16 = 31;
pub const VT_FILETIME: u16 = 64;

/// CLSID of an Excel 97-2003 workbook, `{00020820-0000-0000-C000-000000000046}`
pub const CLSID_EXCEL_WORKBOOK: [u8; 16] = [
    0x20, 0x08, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

/// Name of the workbook stream
pub const WORKBOOK_STREAM: &str = "Workbook";
/// Name of the summary information property stream
pub const SUMMARY_INFORMATION_STREAM: &str = "\u{0005}SummaryInformation";
