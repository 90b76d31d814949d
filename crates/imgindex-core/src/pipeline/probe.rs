//! Image header probing for pixel dimensions and color mode.
//!
//! Only the header is read: the decoder is built from the file, asked for
//! its dimensions and color type, and dropped before returning. Nothing is
//! decoded to pixels.

use std::path::Path;

use crate::error::ScanError;
use crate::types::ImageDimensions;

/// Whether the image metadata provider was compiled into this build.
pub const PROVIDER_AVAILABLE: bool = cfg!(feature = "dimensions");

/// Read width, height and color mode from an image file's header.
#[cfg(feature = "dimensions")]
pub fn probe(path: &Path) -> Result<ImageDimensions, ScanError> {
    use image::{ImageDecoder, ImageReader};

    let err = |message: String| ScanError::Probe {
        path: path.to_path_buf(),
        message,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| err(format!("Cannot open file: {e}")))?
        .with_guessed_format()
        .map_err(|e| err(format!("Cannot detect image format: {e}")))?;
    let decoder = reader.into_decoder().map_err(|e| err(e.to_string()))?;

    let (width, height) = decoder.dimensions();
    Ok(ImageDimensions {
        width,
        height,
        mode: color_mode(decoder.color_type()),
    })
}

/// Provider not compiled in: every probe fails.
#[cfg(not(feature = "dimensions"))]
pub fn probe(path: &Path) -> Result<ImageDimensions, ScanError> {
    Err(ScanError::Probe {
        path: path.to_path_buf(),
        message: "image metadata provider not available".to_string(),
    })
}

/// Short color mode label for a decoder color type.
///
/// The label describes the decoder's output pixels, not the stored format.
/// Palette images (GIF, indexed PNG) are expanded by the decoder, so they
/// report `RGB` or `RGBA` where PIL would report `P`.
#[cfg(feature = "dimensions")]
pub fn color_mode(color: image::ColorType) -> String {
    use image::ColorType;

    match color {
        ColorType::L8 => "L".to_string(),
        ColorType::La8 => "LA".to_string(),
        ColorType::Rgb8 => "RGB".to_string(),
        ColorType::Rgba8 => "RGBA".to_string(),
        ColorType::L16 => "I;16".to_string(),
        ColorType::La16 => "LA;16".to_string(),
        ColorType::Rgb16 => "RGB;16".to_string(),
        ColorType::Rgba16 => "RGBA;16".to_string(),
        ColorType::Rgb32F => "RGBF".to_string(),
        ColorType::Rgba32F => "RGBAF".to_string(),
        other => format!("{other:?}"),
    }
}
