//! Container tests that read the output back with an independent parser

use super::super::consts::*;
use super::OleWriter;
use std::io::{Cursor, Read};

fn read_stream(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut file = cfb::CompoundFile::open(Cursor::new(bytes)).unwrap();
    let mut stream = file.open_stream(name).unwrap();
    let mut data = Vec::new();
    stream.read_to_end(&mut data).unwrap();
    data
}

fn u32_at(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes(data[pos..pos + 4].try_into().unwrap())
}

fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}

fn workbook_file(workbook: &[u8], summary: &[u8]) -> Vec<u8> {
    let mut writer = OleWriter::new();
    writer.set_root_clsid(CLSID_EXCEL_WORKBOOK);
    writer.set_filetime(0x01D0_0000_0000_0000);
    writer.create_stream(WORKBOOK_STREAM, workbook).unwrap();
    writer.create_stream(SUMMARY_INFORMATION_STREAM, summary).unwrap();
    writer.build().unwrap()
}

#[test]
fn test_small_streams_round_trip() {
    let workbook = pattern(700, 1);
    let summary = pattern(200, 2);
    let bytes = workbook_file(&workbook, &summary);

    assert_eq!(&bytes[0..8], MAGIC);
    assert_eq!(read_stream(&bytes, "/Workbook"), workbook);
    assert_eq!(read_stream(&bytes, "/\u{5}SummaryInformation"), summary);
}

#[test]
fn test_big_stream_round_trip() {
    let workbook = pattern(100_000, 3);
    let summary = pattern(300, 4);
    let bytes = workbook_file(&workbook, &summary);

    assert_eq!(read_stream(&bytes, "/Workbook"), workbook);
    assert_eq!(read_stream(&bytes, "/\u{5}SummaryInformation"), summary);
}

#[test]
fn test_cutoff_boundary() {
    // 4095 bytes stays in the mini stream, 4096 moves to big sectors
    for len in [4095usize, 4096] {
        let workbook = pattern(len, 5);
        let bytes = workbook_file(&workbook, &pattern(64, 6));
        assert_eq!(read_stream(&bytes, "/Workbook"), workbook);

        let first_dir = u32_at(&bytes, 48) as usize;
        let workbook_entry = (1 + first_dir) * SECTOR_SIZE + DIRENTRY_SIZE;
        let start = u32_at(&bytes, workbook_entry + 116);
        if len == 4095 {
            // Mini sector 0 of the mini stream
            assert_eq!(start, 0);
        } else {
            // Big sector following the MiniFAT and the one-sector mini stream
            assert_eq!(start, 2);
        }
    }
}

#[test]
fn test_directory_layout() {
    let bytes = workbook_file(&pattern(1000, 7), &pattern(100, 8));
    let mut file = cfb::CompoundFile::open(Cursor::new(&bytes[..])).unwrap();
    assert_eq!(
        file.root_entry().clsid().to_string().to_uppercase(),
        "00020820-0000-0000-C000-000000000046"
    );

    let names: Vec<String> = file
        .read_root_storage()
        .map(|entry| entry.name().to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Workbook".to_string()));
    assert!(names.contains(&"\u{5}SummaryInformation".to_string()));
    assert!(file.open_stream("/Workbook").is_ok());

    let dir = (1 + u32_at(&bytes, 48) as usize) * SECTOR_SIZE;
    // Root child, Workbook right sibling, padding entry
    assert_eq!(u32_at(&bytes, dir + 76), 1);
    assert_eq!(u32_at(&bytes, dir + DIRENTRY_SIZE + 72), 2);
    assert_eq!(bytes[dir + 3 * DIRENTRY_SIZE + 66], STGTY_EMPTY);
}

#[test]
fn test_header_counts_match_sectors() {
    for len in [10usize, 5000, 70_000, 2_000_000] {
        let bytes = workbook_file(&pattern(len, 9), &pattern(180, 10));
        let fat_sectors = u32_at(&bytes, 44) as usize;
        let difat_sectors = u32_at(&bytes, 72) as usize;
        let total = bytes.len() / SECTOR_SIZE - 1;

        assert_eq!(bytes.len() % SECTOR_SIZE, 0);
        assert_eq!(fat_sectors, total.div_ceil(ENTRIES_PER_SECTOR));
        assert_eq!(
            difat_sectors,
            fat_sectors.saturating_sub(HEADER_DIFAT_SLOTS).div_ceil(ENTRIES_PER_SECTOR - 1)
        );
    }
}

#[test]
fn test_difat_file_round_trip() {
    // Needs more than 109 FAT sectors
    let workbook = pattern(109 * 128 * SECTOR_SIZE, 11);
    let bytes = workbook_file(&workbook, &pattern(180, 12));
    assert!(u32_at(&bytes, 72) >= 1);
    assert_eq!(read_stream(&bytes, "/Workbook"), workbook);
}

#[test]
fn test_empty_stream() {
    let bytes = workbook_file(&[], &pattern(100, 13));
    assert!(read_stream(&bytes, "/Workbook").is_empty());

    let dir = (1 + u32_at(&bytes, 48) as usize) * SECTOR_SIZE;
    assert_eq!(u32_at(&bytes, dir + DIRENTRY_SIZE + 116), ENDOFCHAIN);
}

#[test]
fn test_build_is_deterministic() {
    let workbook = pattern(9000, 14);
    let summary = pattern(300, 15);
    assert_eq!(
        workbook_file(&workbook, &summary),
        workbook_file(&workbook, &summary)
    );
}
