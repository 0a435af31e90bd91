//! Samplemap: export biosample submission-portal metadata into user-facility
//! spreadsheet layouts.
//!
//! A declarative JSON mapper document defines the output columns: their
//! order, display names, numbered sub-headers, and the portal-side fields
//! they pull from. Samplemap fetches a submission's records, resolves each
//! one against the mapper, collapses duplicates by a configurable unique
//! field, and assembles the final table.
//!
//! # Core Principles
//!
//! - **Configuration-driven**: the mapper document alone defines the layout
//! - **Deterministic**: identical inputs always produce identical tables
//! - **Missing data is not an error**: absent fields resolve to blanks
//!
//! # Example
//!
//! ```no_run
//! use samplemap::{ExportOptions, MapperConfig, PortalClient, Samplemap, UserFacility};
//!
//! # fn example() -> samplemap::Result<()> {
//! let mapper = MapperConfig::load("emsl_mapper.json")?;
//! let portal = PortalClient::from_env(UserFacility::Emsl)?;
//!
//! let result = Samplemap::new(mapper).export(
//!     &portal,
//!     "submission-id",
//!     &ExportOptions::new("sample_name").with_header(),
//! )?;
//!
//! println!("Exported {} rows", result.summary.rows_exported);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mapper;
pub mod output;
pub mod source;

mod samplemap;

pub use crate::samplemap::{ExportOptions, ExportResult, ExportSummary, Samplemap};
pub use error::{ConfigError, Result, SamplemapError};
pub use mapper::{dedupe, HeaderSpec, MapperConfig, MappingEngine, OutputRow};
pub use output::{write_table, OutputTable, SheetFormat};
pub use source::{PortalClient, RecordSource, SampleRecord, StaticSource, UserFacility};
