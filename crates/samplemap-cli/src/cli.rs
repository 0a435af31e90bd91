//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use samplemap::{SheetFormat, UserFacility};

/// Samplemap: biosample submission spreadsheet export tool
#[derive(Parser)]
#[command(name = "samplemap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a submission and export it as a facility spreadsheet
    Export {
        /// Metadata submission id
        #[arg(short, long)]
        submission: String,

        /// User facility to send data to (emsl, jgi_mg, jgi_mt)
        #[arg(short = 'u', long)]
        facility: UserFacility,

        /// Path to the facility-specific JSON mapper file
        #[arg(short, long, value_name = "FILE")]
        mapper: PathBuf,

        /// Output column used as the deduplication key
        #[arg(long, value_name = "COLUMN")]
        unique_field: String,

        /// Path for the exported spreadsheet
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Include the display-name header row
        #[arg(long)]
        header: bool,

        /// Output format (default: from the output extension, else csv)
        #[arg(short, long)]
        format: Option<SheetFormat>,
    },

    /// Parse a mapper file and print the resolved column layout
    Check {
        /// Path to the JSON mapper file
        #[arg(value_name = "FILE")]
        mapper: PathBuf,

        /// Also validate a unique field against the layout
        #[arg(long, value_name = "COLUMN")]
        unique_field: Option<String>,
    },
}
