//! PNG image transcoder.
//!
//! Decodes an original of any supported format, shrinks it to fit the
//! requested bounds and re-encodes it as PNG.
//!
//! # Design Decisions
//!
//! - **Always decode/encode**: Even when no resize is needed the image is
//!   re-encoded, so clients always receive the same content type.
//!
//! - **Lossless output**: PNG keeps alpha, so transparent originals stay
//!   transparent.
//!
//! - **Shrink only**: Images smaller than the bounds keep their native size.

use std::io::Cursor;

use bytes::Bytes;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};

use super::dimensions::{fit_within, TranscodeBounds};
use crate::error::TranscodeError;

/// Content type of everything the transcoder produces.
pub const OUTPUT_CONTENT_TYPE: &str = "image/png";

/// Result of a transcode.
#[derive(Debug, Clone)]
pub struct TranscodedImage {
    /// PNG-encoded bytes
    pub data: Bytes,

    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,
}

impl TranscodedImage {
    /// Content type for [`Self::data`].
    pub fn content_type(&self) -> &'static str {
        OUTPUT_CONTENT_TYPE
    }
}

/// Image transcoder for gallery previews.
///
/// # Example
///
/// ```ignore
/// use bucket_gallery::transcode::{ImageTranscoder, TranscodeBounds};
///
/// let transcoder = ImageTranscoder::new();
/// let preview = transcoder.resize_and_encode(&original, TranscodeBounds::new(800, 600))?;
/// assert_eq!(preview.content_type(), "image/png");
/// ```
#[derive(Debug, Clone)]
pub struct ImageTranscoder {
    filter: FilterType,
}

impl Default for ImageTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageTranscoder {
    /// Create a transcoder using Lanczos3 resampling.
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    /// Decode `source`, shrink it to fit `bounds` and encode as PNG.
    ///
    /// # Errors
    ///
    /// - [`TranscodeError::Decode`] if the bytes are not a supported image
    /// - [`TranscodeError::Encode`] if PNG encoding fails
    pub fn resize_and_encode(
        &self,
        source: &[u8],
        bounds: TranscodeBounds,
    ) -> Result<TranscodedImage, TranscodeError> {
        let img = decode(source)?;

        let img = if bounds.is_bounded() {
            let (width, height) = fit_within(img.width(), img.height(), bounds);
            if (width, height) == (img.width(), img.height()) {
                img
            } else {
                img.resize_exact(width, height, self.filter)
            }
        } else {
            img
        };

        encode_png(&img)
    }
}

fn decode(source: &[u8]) -> Result<DynamicImage, TranscodeError> {
    ImageReader::new(Cursor::new(source))
        .with_guessed_format()
        .map_err(|e| TranscodeError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| TranscodeError::Decode(e.to_string()))
}

fn encode_png(img: &DynamicImage) -> Result<TranscodedImage, TranscodeError> {
    // The PNG encoder has no float color types
    let converted;
    let img = match img.color() {
        ColorType::Rgba32F => {
            converted = DynamicImage::ImageRgba16(img.to_rgba16());
            &converted
        }
        ColorType::Rgb32F => {
            converted = DynamicImage::ImageRgb16(img.to_rgb16());
            &converted
        }
        _ => img,
    };

    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| TranscodeError::Encode(e.to_string()))?;

    Ok(TranscodedImage {
        data: Bytes::from(output),
        width: img.width(),
        height: img.height(),
    })
}

// =============================================================================
// Tests
// =============================================================================
