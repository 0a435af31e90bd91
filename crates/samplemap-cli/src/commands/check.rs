//! Check command - validate a mapper file and print its column layout.

use std::path::PathBuf;

use colored::Colorize;
use samplemap::{MapperConfig, MappingEngine};

pub fn run(
    mapper: PathBuf,
    unique_field: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !mapper.exists() {
        return Err(format!("Mapper file not found: {}", mapper.display()).into());
    }

    let config = MapperConfig::load(&mapper)?;

    println!(
        "{} {} ({} columns)",
        "Valid mapper".green().bold(),
        mapper.display().to_string().white(),
        config.column_count().to_string().white().bold()
    );

    println!();
    for header in config.headers() {
        print_column(header, false, verbose);
        for sub in &header.sub_headers {
            print_column(sub, true, verbose);
        }
    }

    if let Some(field) = unique_field {
        println!();
        MappingEngine::new(&config, &field)?;
        println!("{} unique field '{}'", "Valid".green().bold(), field.white());
    }

    Ok(())
}

fn print_column(spec: &samplemap::HeaderSpec, indented: bool, verbose: bool) {
    let indent = if indented { "    " } else { "  " };
    println!("{}{:24} {}", indent, spec.name, spec.display_name().cyan());

    if verbose {
        if let Some(mapping) = &spec.sub_port_mapping {
            for (portal, canonical) in mapping {
                println!("{}  {} -> {}", indent, portal.yellow(), canonical);
            }
        }
    }
}
