//! Pipeline orchestration: walk, filter, extract, sort.

use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::error::{ConfigError, ScanError};
use crate::types::{ImageRecord, ScanReport, SkippedFile};

use super::discovery::{DiscoveredFile, ExtensionSet, FileDiscovery};
use super::metadata::MetadataExtractor;
use super::probe::PROVIDER_AVAILABLE;

/// Options for a scan, resolved once before it starts.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Accepted extensions
    pub extensions: ExtensionSet,
    /// Whether the image metadata provider is used
    pub read_dimensions: bool,
}

impl ScanOptions {
    /// Resolve options from scan configuration.
    ///
    /// Dimension reading is enabled only if requested and the provider is
    /// compiled in. Malformed extension tokens are logged; they never match.
    pub fn from_config(config: &ScanConfig) -> Self {
        let extensions = ExtensionSet::from_tokens(&config.extensions);
        for token in extensions.ignored() {
            tracing::warn!("Extension {token:?} can never match a file (expected a form like \".png\")");
        }
        if extensions.is_empty() {
            tracing::warn!("No usable extensions configured; the manifest will be empty");
        }
        Self {
            extensions,
            read_dimensions: config.read_dimensions && PROVIDER_AVAILABLE,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

/// Resolve a scan root to an absolute directory path.
pub fn resolve_root(path: &Path) -> Result<PathBuf, ConfigError> {
    let root = path
        .canonicalize()
        .map_err(|e| ConfigError::RootNotFound {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if !root.is_dir() {
        return Err(ConfigError::RootNotDirectory(root));
    }
    Ok(root)
}

/// Builds the sorted list of image records for a directory tree.
pub struct Indexer {
    discovery: FileDiscovery,
    extractor: MetadataExtractor,
}

impl Indexer {
    /// Create an indexer with the given options.
    pub fn new(options: ScanOptions) -> Self {
        Self {
            discovery: FileDiscovery::new(options.extensions),
            extractor: MetadataExtractor::new(options.read_dimensions),
        }
    }

    /// Scan `root` recursively and return the sorted records.
    ///
    /// `root` should already be resolved with [`resolve_root`].
    pub fn scan(&self, root: &Path) -> ScanReport {
        tracing::debug!("Scanning {:?}", root);
        let report = self.index_files(self.discovery.walk(root));
        tracing::debug!(
            "Indexed {} file(s), skipped {}",
            report.records.len(),
            report.skipped.len()
        );
        report
    }

    /// Extract and sort records for already-discovered files.
    ///
    /// Files whose metadata cannot be read are reported in `skipped`.
    pub fn index_files(&self, files: impl IntoIterator<Item = DiscoveredFile>) -> ScanReport {
        let mut report = ScanReport::default();

        for file in files {
            match self.extractor.extract(&file) {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    tracing::debug!("Skipping: {e}");
                    let reason = match e {
                        ScanError::Stat { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    report.skipped.push(SkippedFile {
                        path: file.path,
                        reason,
                    });
                }
            }
        }

        sort_records(&mut report.records);
        report
    }
}

/// Stable sort by lowercased name.
pub fn sort_records(records: &mut [ImageRecord]) {
    records.sort_by_cached_key(|r| r.name.to_lowercase());
}
