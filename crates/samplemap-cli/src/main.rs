//! Samplemap CLI - biosample submission spreadsheet export tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            submission,
            facility,
            mapper,
            unique_field,
            output,
            header,
            format,
        } => commands::export::run(
            submission,
            facility,
            mapper,
            unique_field,
            output,
            header,
            format,
            cli.verbose,
        ),

        Commands::Check {
            mapper,
            unique_field,
        } => commands::check::run(mapper, unique_field, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
