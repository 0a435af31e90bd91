//! Export command - fetch a submission and write the facility spreadsheet.

use std::path::PathBuf;

use colored::Colorize;
use samplemap::{
    write_table, ExportOptions, MapperConfig, PortalClient, Samplemap, SheetFormat, UserFacility,
};

#[allow(clippy::too_many_arguments)]
pub fn run(
    submission: String,
    facility: UserFacility,
    mapper: PathBuf,
    unique_field: String,
    output: PathBuf,
    header: bool,
    format: Option<SheetFormat>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !mapper.exists() {
        return Err(format!("Mapper file not found: {}", mapper.display()).into());
    }

    // Portal credentials come from the environment; .env is honored the way
    // the submission portal tooling expects.
    dotenvy::dotenv().ok();

    let config = MapperConfig::load(&mapper)?;

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for spec in config.columns() {
            println!("  {:24} {}", spec.name, spec.display_name());
        }
        println!();
    }

    println!(
        "{} submission {} for {}",
        "Fetching".cyan().bold(),
        submission.white(),
        facility.to_string().white()
    );

    let portal = PortalClient::from_env(facility)?;

    let mut options = ExportOptions::new(unique_field);
    if header {
        options = options.with_header();
    }

    let result = Samplemap::new(config).export(&portal, &submission, &options)?;

    println!(
        "Mapped {} records into {} rows ({} duplicates dropped)",
        result.summary.records_fetched.to_string().white().bold(),
        result.summary.rows_exported.to_string().white().bold(),
        result.summary.duplicates_dropped.to_string().yellow()
    );

    let format = format
        .or_else(|| SheetFormat::from_path(&output))
        .unwrap_or_default();
    write_table(&result.table, &output, format)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output.display().to_string().white()
    );

    Ok(())
}
