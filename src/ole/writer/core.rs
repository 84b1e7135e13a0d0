//! Compound file writer
//!
//! Collects top-level streams in memory and emits a complete version 3
//! compound file in one pass.
//!
//! # Sector order
//!
//! Regions are written in a fixed order after the header:
//!
//! ```text
//! MiniFAT | mini stream | big streams | directory | FAT | DIFAT
//! ```
//!
//! Every region is one contiguous chain. Streams shorter than 4096 bytes are
//! packed into the mini stream, which the root entry owns.
//!
//! # Directory order
//!
//! Streams are sorted by name length, then by upper-cased name. The root's
//! child is the first stream and each stream links the next one as its
//! right sibling.
//!
//! # Example
//!
//! ```rust
//! use csv2xls::ole::writer::OleWriter;
//!
//! let mut writer = OleWriter::new();
//! writer.create_stream("Workbook", b"payload")?;
//! let bytes = writer.build()?;
//! assert_eq!(bytes.len() % 512, 0);
//! # Ok::<(), csv2xls::ole::OleError>(())
//! ```
use super::super::consts::*;
use super::super::error::OleError;
use super::difat::DifatBuilder;
use super::directory::{DirectoryEntryBuilder, generate_directory};
use super::fat::FatBuilder;
use super::header::HeaderBuilder;
use super::layout::compute_layout;
use super::minifat::MiniFatBuilder;

/// Where a stream's data ended up
#[derive(Debug, Clone, Copy)]
enum Placement {
    /// Starting mini sector inside the mini stream
    Mini(u32),
    /// Index into the list of big streams
    Big(usize),
}

/// OLE file writer
#[derive(Debug, Clone)]
pub struct OleWriter {
    /// Top-level streams as (name, data), in insertion order
    streams: Vec<(String, Vec<u8>)>,
    /// CLSID stored on the root entry
    root_clsid: [u8; 16],
    /// Creation and modification FILETIME stamped on every entry
    filetime: u64,
}

impl Default for OleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OleWriter {
    pub fn new() -> Self {
        Self {
            streams: Vec::new(),
            root_clsid: [0; 16],
            filetime: 0,
        }
    }

    /// Set the root entry's class id
    pub fn set_root_clsid(&mut self, clsid: [u8; 16]) {
        self.root_clsid = clsid;
    }

    /// Set the FILETIME written into every directory entry
    pub fn set_filetime(&mut self, filetime: u64) {
        self.filetime = filetime;
    }

    /// Add a stream below the root storage
    ///
    /// # Errors
    ///
    /// Fails when the name is empty, longer than 31 UTF-16 code units, or
    /// already taken.
    pub fn create_stream(&mut self, name: &str, data: &[u8]) -> Result<(), OleError> {
        if name.is_empty() || name.encode_utf16().count() > 31 {
            return Err(OleError::InvalidData(format!("invalid stream name {:?}", name)));
        }
        if self
            .streams
            .iter()
            .any(|(existing, _)| compare_key(existing) == compare_key(name))
        {
            return Err(OleError::InvalidData(format!("duplicate stream name {:?}", name)));
        }

        self.streams.push((name.to_string(), data.to_vec()));
        Ok(())
    }

    /// Lay out and serialize the compound file
    pub fn build(&self) -> Result<Vec<u8>, OleError> {
        let mut streams: Vec<&(String, Vec<u8>)> = self.streams.iter().collect();
        streams.sort_by_key(|(name, _)| compare_key(name));

        // Size pass: pack small streams, collect big ones
        let mut minifat = MiniFatBuilder::new();
        let mut big: Vec<&[u8]> = Vec::new();
        let mut placements = Vec::with_capacity(streams.len());
        for (_, data) in &streams {
            if data.len() < MINI_STREAM_CUTOFF {
                placements.push(Placement::Mini(minifat.allocate_mini_chain(data)));
            } else {
                placements.push(Placement::Big(big.len()));
                big.push(data);
            }
        }

        let big_sectors: usize = big.iter().map(|data| data.len().div_ceil(SECTOR_SIZE)).sum();
        let entry_count = streams.len() + 1;
        let directory_sectors = (entry_count * DIRENTRY_SIZE).div_ceil(SECTOR_SIZE);
        let layout = compute_layout(
            minifat.minifat_sector_count(),
            minifat.ministream_sector_count(),
            big_sectors,
            directory_sectors,
        );

        // Allocation pass, in file order
        let minifat_bytes = minifat.generate_minifat_sectors();
        let ministream = minifat.ministream_data();

        let mut fat = FatBuilder::new();
        let minifat_start = fat.allocate_chain(minifat_bytes.len());
        let ministream_start = fat.allocate_chain(ministream.len());
        let big_starts: Vec<u32> = big.iter().map(|data| fat.allocate_chain(data.len())).collect();
        let directory_start = fat.allocate_chain(directory_sectors * SECTOR_SIZE);
        let fat_start = fat.allocate_special(layout.fat_sectors, FATSECT);
        let difat_start = fat.allocate_special(layout.difat_sectors, DIFSECT);

        if fat.total_sectors() != layout.total_sectors() {
            return Err(OleError::Layout(format!(
                "allocated {} sectors, layout expects {}",
                fat.total_sectors(),
                layout.total_sectors()
            )));
        }
        fat.validate()?;

        // Directory
        let mut entries = Vec::with_capacity(entry_count);
        entries.push(
            DirectoryEntryBuilder::root(ministream_start, ministream.len() as u64)
                .with_clsid(self.root_clsid)
                .with_child(if streams.is_empty() { NOSTREAM } else { 1 }),
        );
        for (i, ((name, data), placement)) in streams.iter().zip(&placements).enumerate() {
            let start = match *placement {
                Placement::Mini(sector) => sector,
                Placement::Big(index) => big_starts[index],
            };
            let mut entry = DirectoryEntryBuilder::stream(name, start, data.len() as u64);
            if i + 1 < streams.len() {
                entry = entry.with_right_sibling(i as u32 + 2);
            }
            entries.push(entry);
        }
        let directory = generate_directory(&entries, self.filetime)?;

        // Header
        let difat = DifatBuilder::new(fat_start, layout.fat_sectors);
        let mut header = HeaderBuilder::new();
        header
            .set_first_dir_sector(directory_start)
            .set_minifat(minifat_start, layout.minifat_sectors as u32)
            .set_fat(layout.fat_sectors as u32, difat.header_slots())
            .set_difat(difat_start, layout.difat_sectors as u32);

        // Emit
        let expected_len = (1 + layout.total_sectors()) * SECTOR_SIZE;
        let mut out = Vec::with_capacity(expected_len);
        out.extend_from_slice(&header.generate());
        out.extend_from_slice(&minifat_bytes);
        write_padded(&mut out, ministream);
        for data in &big {
            write_padded(&mut out, data);
        }
        out.extend_from_slice(&directory);
        out.extend_from_slice(&fat.generate_fat_sectors());
        out.extend_from_slice(&difat.generate_difat_sectors(difat_start));

        if out.len() != expected_len {
            return Err(OleError::Layout(format!(
                "emitted {} bytes, layout expects {}",
                out.len(),
                expected_len
            )));
        }

        log::debug!(
            "compound file: {} streams, {} sectors, {} bytes",
            streams.len(),
            layout.total_sectors(),
            out.len()
        );
        Ok(out)
    }
}

/// Sibling ordering key: name length in code units, then upper-cased name
fn compare_key(name: &str) -> (usize, String) {
    (name.encode_utf16().count(), name.to_uppercase())
}

/// Append `data` zero-padded to a whole number of sectors
fn write_padded(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
    let remainder = data.len() % SECTOR_SIZE;
    if remainder != 0 {
        out.resize(out.len() + SECTOR_SIZE - remainder, 0);
    }
}
