//! Command-line front end: convert one delimited text file into an `.xls` workbook.
//!
//! # Usage
//!
//! ```sh
//! csv2xls --csv-file-name data.csv --xls-file-name data.xls
//! csv2xls --csv-file-name data.csv --xls-file-name data.xls \
//!     --csv-delimiter , --title "Q3" --creator "Finance" --column-width 0=30
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use csv2xls::{
    ColumnSettings, ConvertOptions, CsvOptions, DocumentProperties, convert, parse_column_width,
    read_grid_from_path, write_document,
};
use std::path::PathBuf;

/// Convert a CSV file to an Excel 97-2003 workbook
#[derive(Parser, Debug)]
#[command(name = "csv2xls")]
#[command(about = "Convert delimited text files into legacy Excel (.xls) workbooks")]
#[command(version)]
struct Cli {
    /// Delimited text file to read
    #[arg(long, value_name = "PATH")]
    csv_file_name: PathBuf,

    /// Workbook to create
    #[arg(long, value_name = "PATH")]
    xls_file_name: PathBuf,

    /// Field delimiter, a single character
    #[arg(long, value_name = "CHAR", default_value = ";")]
    csv_delimiter: String,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Document subject
    #[arg(long)]
    subject: Option<String>,

    /// Document author
    #[arg(long)]
    creator: Option<String>,

    /// Document keywords
    #[arg(long)]
    keywords: Option<String>,

    /// Document comments
    #[arg(long)]
    description: Option<String>,

    /// Name stored as the last editor
    #[arg(long)]
    last_modified_by: Option<String>,

    /// Column width override as COL=WIDTH, zero-based column; repeatable
    #[arg(long, value_name = "COL=WIDTH")]
    column_width: Vec<String>,
}

impl Cli {
    fn properties(&self) -> DocumentProperties {
        DocumentProperties {
            title: self.title.clone(),
            subject: self.subject.clone(),
            author: self.creator.clone(),
            keywords: self.keywords.clone(),
            comments: self.description.clone(),
            last_saved_by: self.last_modified_by.clone(),
        }
    }

    fn columns(&self) -> Result<ColumnSettings> {
        let mut columns = ColumnSettings::new();
        for value in &self.column_width {
            let (col, width) = parse_column_width(value)?;
            columns.set_width(col, width);
        }
        Ok(columns)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let csv_options = CsvOptions::from_delimiter(&cli.csv_delimiter)?;
    let options = ConvertOptions::new()
        .with_properties(cli.properties())
        .with_columns(cli.columns()?);

    let grid = read_grid_from_path(&cli.csv_file_name, &csv_options)
        .with_context(|| format!("Failed to read {}", cli.csv_file_name.display()))?;

    let bytes = convert(&grid, &options, Utc::now()).context("Failed to encode workbook")?;

    write_document(&cli.xls_file_name, &bytes)
        .with_context(|| format!("Failed to write {}", cli.xls_file_name.display()))?;

    Ok(())
}
