//! Raster payload validation.
//!
//! Packaged tile files routinely contain rows that are not images at all:
//! captured HTML error pages, vector tiles, zero-length placeholders. Rather
//! than hand those to an image decoder, payloads are screened by their
//! leading signature bytes.

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG start-of-image marker followed by the first segment marker prefix.
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Raster encodings accepted as tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    /// Identify the raster format from a payload's leading bytes.
    ///
    /// Returns `None` for anything that is not a PNG or JPEG image.
    pub fn sniff(payload: &[u8]) -> Option<Self> {
        if payload.starts_with(&PNG_SIGNATURE) {
            Some(RasterFormat::Png)
        } else if payload.starts_with(&JPEG_SIGNATURE) {
            Some(RasterFormat::Jpeg)
        } else {
            None
        }
    }

    /// MIME type for the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg => "image/jpeg",
        }
    }
}

/// True when `payload` carries a PNG or JPEG signature.
#[inline]
pub fn is_valid_raster(payload: &[u8]) -> bool {
    RasterFormat::sniff(payload).is_some()
}
