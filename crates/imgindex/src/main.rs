//! imgindex CLI - scan a directory for images and write an images.json manifest.
//!
//! Each manifest entry carries the file's root-relative path, name, size,
//! modification time and, when the header can be read, its pixel dimensions
//! and color mode.
//!
//! # Usage
//!
//! ```bash
//! # Index the current directory into ./images.json
//! imgindex
//!
//! # Index a site's asset folder, PNG and JPEG only
//! imgindex ./public/img --extensions .png,.jpg,.jpeg --out manifest.json
//!
//! # Show the effective configuration
//! imgindex --print-config
//! ```

use anyhow::Context;
use clap::Parser;
use imgindex_core::Config;
use std::path::PathBuf;

mod cli;
mod logging;

/// imgindex - Scan a directory for images and write a JSON manifest.
#[derive(Parser, Debug)]
#[command(name = "imgindex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    scan: cli::scan::ScanArgs,

    /// Config file to load instead of the default location
    #[arg(long, value_name = "FILE", env = "IMGINDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().with_context(|| {
            format!(
                "Failed to load config from {}",
                Config::default_path().display()
            )
        })?,
    };
    cli.scan.apply_to(&mut config);
    config.validate()?;

    logging::init_from_config(&config, cli.verbose, cli.json_logs);
    tracing::debug!("imgindex v{}", imgindex_core::VERSION);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    cli::scan::execute(&cli.scan, &config)
}
