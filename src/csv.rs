//! Delimited text input
//!
//! Reads a CSV-like file into the row/column grid the encoders consume.
//! Every record becomes one row of owned strings; rows may differ in length.

use crate::common::error::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Field delimiter used when none is given
pub const DEFAULT_DELIMITER: u8 = b';';

/// Options controlling how delimited input is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CsvOptions {
    /// Build options from a user-supplied delimiter string
    ///
    /// An empty string keeps the default `;`. Anything other than a single
    /// ASCII character is rejected.
    pub fn from_delimiter(delimiter: &str) -> Result<Self> {
        let mut chars = delimiter.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Self::default()),
            (Some(c), None) if c.is_ascii() => Ok(Self {
                delimiter: c as u8,
            }),
            _ => Err(Error::InvalidDelimiter(delimiter.to_string())),
        }
    }
}

/// Read every record of `reader` into a grid
pub fn read_grid<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<Vec<String>>> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid: Vec<Vec<String>> = Vec::new();
    let mut width: Option<usize> = None;
    for record in rdr.records() {
        let record = record?;
        match width {
            None => width = Some(record.len()),
            Some(expected) if expected != record.len() => {
                log::warn!(
                    "row {} has {} fields, first row has {}",
                    grid.len() + 1,
                    record.len(),
                    expected
                );
            },
            Some(_) => {},
        }
        grid.push(record.iter().map(str::to_string).collect());
    }

    log::debug!("read {} rows of delimited input", grid.len());
    Ok(grid)
}

/// Open `path` and read it into a grid
pub fn read_grid_from_path<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Vec<Vec<String>>> {
    let file = std::fs::File::open(path.as_ref()).map_err(Error::Io)?;
    read_grid(std::io::BufReader::new(file), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delimiter() {
        assert_eq!(CsvOptions::from_delimiter("").unwrap().delimiter, b';');
        assert_eq!(CsvOptions::from_delimiter(",").unwrap().delimiter, b',');
        assert_eq!(CsvOptions::from_delimiter("\t").unwrap().delimiter, b'\t');
        assert!(matches!(
            CsvOptions::from_delimiter(";;"),
            Err(Error::InvalidDelimiter(_))
        ));
        assert!(matches!(
            CsvOptions::from_delimiter("§"),
            Err(Error::InvalidDelimiter(_))
        ));
    }

    #[test]
    fn test_read_grid_semicolon() {
        let input = "a;b\nc;\n";
        let grid = read_grid(input.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(
            grid,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn test_read_grid_ragged_and_quoted() {
        let options = CsvOptions::from_delimiter(",").unwrap();
        let input = "x,\"y, z\"\n1\n\"multi\nline\",2,3\n";
        let grid = read_grid(input.as_bytes(), &options).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0], vec!["x", "y, z"]);
        assert_eq!(grid[1], vec!["1"]);
        assert_eq!(grid[2], vec!["multi\nline", "2", "3"]);
    }

    #[test]
    fn test_read_grid_empty_input() {
        let grid = read_grid(&b""[..], &CsvOptions::default()).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_unicode_fields() {
        let grid = read_grid("héllo;日本語\n".as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(grid[0], vec!["héllo", "日本語"]);
    }

    #[test]
    fn test_missing_file() {
        let result = read_grid_from_path("/nonexistent/input.csv", &CsvOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_utf8_is_csv_error() {
        let result = read_grid(&[0x61, 0xFF, 0x3B, 0x62][..], &CsvOptions::default());
        assert!(matches!(result, Err(Error::Csv(_))));
    }
}
