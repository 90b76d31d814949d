//! imgindex core - build a JSON manifest of the images under a directory.
//!
//! # Architecture
//!
//! A single sequential pipeline:
//!
//! ```text
//! Walk → Filter by extension → Stat + probe header → Sort by name → JSON
//! ```
//!
//! Files whose metadata cannot be read are reported and left out. Files whose
//! image header cannot be read are kept without `width`/`height`/`mode`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use imgindex_core::{resolve_root, write_manifest, Config, Indexer, ScanOptions};
//!
//! fn main() -> imgindex_core::Result<()> {
//!     let config = Config::load()?;
//!     let root = resolve_root(std::path::Path::new("./site/assets"))?;
//!     let report = Indexer::new(ScanOptions::from_config(&config.scan)).scan(&root);
//!     write_manifest(&root.join(&config.scan.output_file), &report.records)?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, IndexError, Result, ScanError};
pub use output::{write_manifest, ManifestWriter};
pub use pipeline::{resolve_root, Indexer, ScanOptions};
pub use types::{ImageDimensions, ImageRecord, ScanReport, SkippedFile};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
