//! Shared string table construction
//!
//! Every non-empty cell of the workbook is stored once in the SST and
//! referenced by index from its LABELSST record. Empty cells become BLANK
//! records and never enter the table, but they still count toward the SST's
//! total-references field.

use crate::ole::xls::{XlsError, XlsResult};
use std::collections::HashMap;

/// Deduplicated, first-occurrence ordered string table
#[derive(Debug, Clone, Default)]
pub struct SharedStringTable {
    /// String to index mapping for deduplication
    index: HashMap<String, u32>,
    /// Unique strings in index order
    strings: Vec<String>,
    /// Number of cells seen, empty ones included
    total: u32,
}

impl SharedStringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a grid, scanning rows top to bottom and cells
    /// left to right
    pub fn from_grid(grid: &[Vec<String>]) -> Self {
        let mut table = Self::new();
        for row in grid {
            for value in row {
                table.insert(value);
            }
        }
        log::debug!(
            "shared string table: {} unique of {} cells",
            table.unique_count(),
            table.total_count()
        );
        table
    }

    /// Record one cell value
    pub fn insert(&mut self, value: &str) {
        self.total = self.total.saturating_add(1);
        if value.is_empty() || self.index.contains_key(value) {
            return;
        }
        let next = self.strings.len() as u32;
        self.index.insert(value.to_owned(), next);
        self.strings.push(value.to_owned());
    }

    /// Index of a previously inserted non-empty value
    pub fn index_of(&self, value: &str) -> XlsResult<u32> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| XlsError::MissingSharedString(value.to_owned()))
    }

    /// Number of distinct non-empty strings
    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    /// Number of cells recorded, empty ones included
    pub fn total_count(&self) -> u32 {
        self.total
    }

    /// Unique strings in index order
    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}
