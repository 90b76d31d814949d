//! Indexing pipeline components.
//!
//! - **discovery**: Walk the scan root and filter by extension
//! - **probe**: Read pixel dimensions and color mode from image headers
//! - **metadata**: Build one record per file from stat info and the probe
//! - **processor**: Orchestrates the walk, extraction and sort

pub mod discovery;
pub mod metadata;
pub mod probe;
pub mod processor;

// Re-exports for convenient access
pub use discovery::{DiscoveredFile, ExtensionSet, FileDiscovery};
pub use metadata::{format_modified, MetadataExtractor};
pub use probe::{probe, PROVIDER_AVAILABLE};
pub use processor::{resolve_root, sort_records, Indexer, ScanOptions};
