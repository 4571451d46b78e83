//! Portal CLI Binary
//!
//! Command-line interface for the photo portal.

use clap::Parser;
use photo_portal::config::ConfigLoader;
use photo_portal::logging::{init_logging, LoggingConfig};
use photo_portal::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut logging = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.root),
    }
    .map(|config| config.logging)
    .unwrap_or_else(|_| LoggingConfig::default());
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    if cli.log_file.is_some() {
        logging.file = cli.log_file.clone();
    }
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::new(cli.root.clone(), cli.config.clone(), &cli.role) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing portal: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
