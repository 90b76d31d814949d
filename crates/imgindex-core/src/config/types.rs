//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Extensions indexed when nothing else is configured.
pub const DEFAULT_EXTENSIONS: [&str; 9] = [
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".avif", ".bmp", ".tiff", ".svg",
];

/// Manifest file name written inside the scan root.
pub const DEFAULT_OUTPUT_FILE: &str = "images.json";

/// Scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Accepted extensions, each with its leading dot
    pub extensions: Vec<String>,

    /// Manifest file name, relative to the scan root
    pub output_file: String,

    /// Read pixel dimensions and color mode when the provider is compiled in
    pub read_dimensions: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            read_dimensions: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
