//! The scan command: index a directory and write its manifest.

use clap::Args;
use imgindex_core::{resolve_root, write_manifest, Config, Indexer, ScanOptions};
use std::path::PathBuf;

/// Arguments for a scan.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Comma-separated list of extensions (with dot)
    #[arg(long, value_name = "LIST")]
    pub extensions: Option<String>,

    /// Output JSON file name, written inside the root
    #[arg(long, value_name = "FILE")]
    pub out: Option<String>,

    /// Skip reading pixel dimensions and color mode
    #[arg(long)]
    pub no_dimensions: bool,
}

impl ScanArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(list) = &self.extensions {
            config.scan.extensions = list.split(',').map(str::to_string).collect();
        }
        if let Some(out) = &self.out {
            config.scan.output_file = out.clone();
        }
        if self.no_dimensions {
            config.scan.read_dimensions = false;
        }
    }
}

/// Execute a scan with the effective configuration.
pub fn execute(args: &ScanArgs, config: &Config) -> anyhow::Result<()> {
    let root = resolve_root(&args.root)?;
    let options = ScanOptions::from_config(&config.scan);

    println!(
        "Scanning {} for extensions: {}",
        root.display(),
        options.extensions.display_list()
    );
    if !options.read_dimensions && config.scan.read_dimensions {
        tracing::debug!("Image metadata provider not compiled in; dimensions disabled");
    }

    let report = Indexer::new(options).scan(&root);
    for skipped in &report.skipped {
        eprintln!(
            "Warning: couldn't stat {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }

    let out_path = root.join(&config.scan.output_file);
    let written = write_manifest(&out_path, &report.records)?;

    println!("Wrote {} entries to {}", written, out_path.display());
    Ok(())
}
