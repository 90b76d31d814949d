//! Per-file metadata extraction.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

use super::discovery::{suffix_of, DiscoveredFile};
use super::probe;
use crate::error::ScanError;
use crate::types::ImageRecord;

/// Builds manifest records from discovered files.
pub struct MetadataExtractor {
    read_dimensions: bool,
}

impl MetadataExtractor {
    /// Create an extractor. `read_dimensions` is the resolved provider capability.
    pub fn new(read_dimensions: bool) -> Self {
        Self { read_dimensions }
    }

    /// Build the record for one file.
    ///
    /// Fails only when filesystem metadata cannot be read. A failed header
    /// probe is not an error: the record is returned without dimensions.
    pub fn extract(&self, file: &DiscoveredFile) -> Result<ImageRecord, ScanError> {
        let meta = std::fs::metadata(&file.path).map_err(|source| ScanError::Stat {
            path: file.path.clone(),
            source,
        })?;
        let modified = meta.modified().map_err(|source| ScanError::Stat {
            path: file.path.clone(),
            source,
        })?;

        let dimensions = if self.should_probe(&file.file_name) {
            probe::probe(&file.path).ok()
        } else {
            None
        };

        Ok(ImageRecord {
            path: file.relative.clone(),
            name: file.file_name.clone(),
            size_bytes: meta.len(),
            modified: format_modified(modified),
            dimensions,
        })
    }

    /// Vector images are never probed.
    fn should_probe(&self, file_name: &str) -> bool {
        self.read_dimensions && suffix_of(file_name).as_deref() != Some(".svg")
    }
}

/// Format a modification time as naive UTC ISO-8601 followed by a literal `Z`.
///
/// Nanoseconds are rounded half-to-even to microseconds, carrying into the
/// seconds. Microseconds are appended only when non-zero after rounding.
pub fn format_modified(time: SystemTime) -> String {
    let utc: DateTime<Utc> = time.into();
    let (secs, micros) = round_to_micros(utc.timestamp(), utc.timestamp_subsec_nanos());
    let naive = DateTime::from_timestamp(secs, micros * 1_000)
        .unwrap_or(utc)
        .naive_utc();
    let iso = if micros == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    };
    iso + "Z"
}

/// Round a sub-second nanosecond count to whole microseconds, half-to-even.
fn round_to_micros(secs: i64, nanos: u32) -> (i64, u32) {
    let mut micros = nanos / 1_000;
    let rem = nanos % 1_000;
    if rem > 500 || (rem == 500 && micros % 2 == 1) {
        micros += 1;
    }
    if micros == 1_000_000 {
        (secs + 1, 0)
    } else {
        (secs, micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    fn discovered(root: &Path, relative: &str) -> DiscoveredFile {
        let path = root.join(relative);
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        DiscoveredFile {
            path,
            relative: relative.to_string(),
            file_name,
        }
    }

    #[test]
    fn test_format_modified_whole_seconds() {
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(format_modified(t), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_format_modified_rounds_to_nearest_microsecond() {
        let t = SystemTime::UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
        assert_eq!(format_modified(t), "2023-11-14T22:13:20.123457Z");
        let t = SystemTime::UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_200);
        assert_eq!(format_modified(t), "2023-11-14T22:13:20.123456Z");
    }

    #[test]
    fn test_format_modified_rounding_carries_into_seconds() {
        let t = SystemTime::UNIX_EPOCH + Duration::new(1_700_000_000, 999_999_800);
        assert_eq!(format_modified(t), "2023-11-14T22:13:21Z");
    }

    #[test]
    fn test_format_modified_sub_microsecond_rounds_down_to_whole_second() {
        let t = SystemTime::UNIX_EPOCH + Duration::new(0, 499);
        assert_eq!(format_modified(t), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_round_to_micros_ties_to_even() {
        assert_eq!(round_to_micros(5, 500), (5, 0));
        assert_eq!(round_to_micros(5, 1_500), (5, 2));
        assert_eq!(round_to_micros(5, 2_500), (5, 2));
        assert_eq!(round_to_micros(5, 999_999_500), (6, 0));
    }

    #[test]
    fn test_format_modified_before_epoch() {
        let t = SystemTime::UNIX_EPOCH - Duration::from_secs(86_400);
        assert_eq!(format_modified(t), "1969-12-31T00:00:00Z");
    }

    #[test]
    fn test_extract_missing_file() {
        let extractor = MetadataExtractor::new(true);
        let file = DiscoveredFile {
            path: PathBuf::from("/nonexistent/file.jpg"),
            relative: "file.jpg".to_string(),
            file_name: "file.jpg".to_string(),
        };
        let err = extractor.extract(&file).unwrap_err();
        assert!(matches!(err, ScanError::Stat { .. }));
        assert!(err.to_string().starts_with("couldn't stat /nonexistent/file.jpg"));
    }

    #[test]
    fn test_extract_invalid_image_keeps_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.PNG"), b"0123456789").unwrap();

        let extractor = MetadataExtractor::new(true);
        let record = extractor.extract(&discovered(dir.path(), "b.PNG")).unwrap();
        assert_eq!(record.name, "b.PNG");
        assert_eq!(record.path, "b.PNG");
        assert_eq!(record.size_bytes, 10);
        assert!(record.modified.ends_with('Z'));
        assert!(record.dimensions.is_none());
    }

    #[test]
    fn test_svg_is_never_probed() {
        let extractor = MetadataExtractor::new(true);
        assert!(!extractor.should_probe("logo.svg"));
        assert!(!extractor.should_probe("logo.SVG"));
        assert!(extractor.should_probe("logo.png"));
    }

    #[test]
    fn test_disabled_capability_never_probes() {
        let extractor = MetadataExtractor::new(false);
        assert!(!extractor.should_probe("photo.jpg"));
    }

    #[cfg(feature = "dimensions")]
    #[test]
    fn test_extract_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        image::RgbImage::new(2, 3)
            .save(dir.path().join("sub/a.jpg"))
            .unwrap();

        let extractor = MetadataExtractor::new(true);
        let record = extractor.extract(&discovered(dir.path(), "sub/a.jpg")).unwrap();
        let dims = record.dimensions.unwrap();
        assert_eq!((dims.width, dims.height), (2, 3));
        assert_eq!(record.path, "sub/a.jpg");
        assert_eq!(record.name, "a.jpg");
    }

    #[cfg(feature = "dimensions")]
    #[test]
    fn test_extract_without_capability_omits_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(2, 3)
            .save(dir.path().join("a.jpg"))
            .unwrap();

        let extractor = MetadataExtractor::new(false);
        let record = extractor.extract(&discovered(dir.path(), "a.jpg")).unwrap();
        assert!(record.dimensions.is_none());
    }
}
