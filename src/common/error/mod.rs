//! Unified error types for the csv2xls library.
//!
//! This module provides a single error type that covers input reading,
//! BIFF8 encoding and compound file layout, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
