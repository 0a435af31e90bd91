//! Table serialization to disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Result, SamplemapError};

use super::table::OutputTable;

/// On-disk formats for the assembled table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl SheetFormat {
    /// Guess the format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }

    fn delimiter(self) -> u8 {
        match self {
            SheetFormat::Csv => b',',
            SheetFormat::Tsv => b'\t',
            SheetFormat::Json => unreachable!("json has no delimiter"),
        }
    }
}

impl std::str::FromStr for SheetFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(SheetFormat::Csv),
            "tsv" => Ok(SheetFormat::Tsv),
            "json" => Ok(SheetFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetFormat::Csv => write!(f, "csv"),
            SheetFormat::Tsv => write!(f, "tsv"),
            SheetFormat::Json => write!(f, "json"),
        }
    }
}

/// Write an assembled table to disk.
///
/// The table is complete before this is called; nothing is written on an
/// upstream failure.
pub fn write_table(table: &OutputTable, path: impl AsRef<Path>, format: SheetFormat) -> Result<()> {
    let path = path.as_ref();

    match format {
        SheetFormat::Csv | SheetFormat::Tsv => {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(format.delimiter())
                .from_path(path)?;
            for row in table.iter_rows() {
                writer.write_record(row)?;
            }
            writer.flush().map_err(|e| SamplemapError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        SheetFormat::Json => {
            let file = File::create(path).map_err(|e| SamplemapError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            serde_json::to_writer_pretty(BufWriter::new(file), table)?;
        }
    }

    Ok(())
}
