//! Compound file writing
//!
//! Builds version 3 compound files (512-byte sectors) from a flat set of
//! streams below the root storage.

/// FAT (File Allocation Table) generation
mod fat;

/// MiniFAT (Mini File Allocation Table) generation
mod minifat;

/// DIFAT (Double Indirect FAT) generation
mod difat;

/// Directory entry generation
mod directory;

/// Compound file header generation
mod header;

/// FAT/DIFAT sector budget
mod layout;

/// Core OLE writer implementation
mod core;

#[cfg(test)]
mod tests;

pub use core::OleWriter;
pub use layout::{Layout, compute_layout};
