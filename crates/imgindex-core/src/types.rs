//! Core data types for the image manifest.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One manifest entry describing a single indexed file.
///
/// Field order here is the key order in the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Path relative to the scan root, `/`-separated
    pub path: String,

    /// File name including extension
    pub name: String,

    /// File size in bytes
    pub size_bytes: u64,

    /// Modification time, naive UTC ISO-8601 with a literal `Z`
    pub modified: String,

    /// Pixel dimensions and color mode, present only when probing succeeded
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
}

/// Header information read by the image metadata provider.
///
/// Kept as one value so the three fields are always present or absent together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Color mode label ("RGB", "RGBA", "L", ...)
    pub mode: String,
}

/// A file left out of the manifest because its metadata could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Full path to the file
    pub path: PathBuf,

    /// Why the stat call failed
    pub reason: String,
}

/// The outcome of scanning one root.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Records sorted by lowercased name
    pub records: Vec<ImageRecord>,

    /// Files dropped because stat failed, in walk order
    pub skipped: Vec<SkippedFile>,
}
