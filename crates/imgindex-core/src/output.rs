//! Manifest serialization.
//!
//! The manifest is a single pretty-printed JSON array (2-space indent,
//! non-ASCII kept literal, no trailing newline).

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::IndexError;
use crate::types::ImageRecord;

/// A writer that serializes records as a JSON array.
pub struct ManifestWriter<W: Write> {
    writer: W,
    items_written: usize,
}

impl<W: Write> ManifestWriter<W> {
    /// Create a new manifest writer over any `Write` sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            items_written: 0,
        }
    }

    /// Write all items as one JSON array.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, items)?;
        self.items_written += items.len();
        Ok(())
    }

    /// Get the number of items written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write records to `path`, replacing any existing file.
///
/// The file is truncated and written in place.
pub fn write_manifest(path: &Path, records: &[ImageRecord]) -> Result<usize, IndexError> {
    let wrap = |source: io::Error| IndexError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut writer = ManifestWriter::new(BufWriter::new(file));
    writer
        .write_all(records)
        .map_err(|e| serialize_error(path, e))?;
    writer.flush().map_err(wrap)?;
    Ok(writer.items_written())
}

/// I/O failures while serializing are write errors; anything else is a JSON error.
fn serialize_error(path: &Path, err: serde_json::Error) -> IndexError {
    if err.is_io() {
        IndexError::Write {
            path: path.to_path_buf(),
            source: err.into(),
        }
    } else {
        IndexError::Json(err)
    }
}
