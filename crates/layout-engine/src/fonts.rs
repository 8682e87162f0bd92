//! Label text rendering behind a trait seam.
//!
//! The engine depends on [`TextRenderer`] so layout tests can observe draw
//! calls without a font file; [`FontCatalog`] is the real implementation,
//! one TTF exposed at a fixed ladder of pixel sizes.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_text_mut;

/// Smallest preloaded label size.
pub const MIN_FONT_PX: u32 = 16;
/// Largest preloaded label size.
pub const MAX_FONT_PX: u32 = 30;

/// Whether a size belongs to the preloaded set (even sizes 16..=30).
pub fn is_supported_size(size_px: u32) -> bool {
    (MIN_FONT_PX..=MAX_FONT_PX).contains(&size_px) && size_px % 2 == 0
}

/// Capability to measure and draw label text.
pub trait TextRenderer: Send + Sync {
    /// Line advance for a size, or `None` when the size is not preloaded.
    fn line_height(&self, size_px: u32) -> Option<u32>;

    /// Draw one line of black text with its top-left corner at (x, y).
    fn draw(&self, img: &mut GrayImage, x: i32, y: i32, size_px: u32, text: &str);
}

/// Failure to load the label font at startup.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("cannot read font file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid font data: {0}")]
    Parse(#[from] ab_glyph::InvalidFont),
}

/// TTF-backed renderer serving the preloaded size ladder.
#[derive(Debug)]
pub struct FontCatalog {
    font: FontVec,
}

impl FontCatalog {
    /// Load the catalog font from a TTF/OTF file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes)
    }

    /// Build the catalog from raw font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        let font = FontVec::try_from_vec(bytes)?;
        Ok(Self { font })
    }
}

impl TextRenderer for FontCatalog {
    fn line_height(&self, size_px: u32) -> Option<u32> {
        if !is_supported_size(size_px) {
            return None;
        }
        let scaled = self.font.as_scaled(PxScale::from(size_px as f32));
        Some((scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32)
    }

    fn draw(&self, img: &mut GrayImage, x: i32, y: i32, size_px: u32, text: &str) {
        let scale = PxScale::from(size_px as f32);
        draw_text_mut(img, Luma([0u8]), x, y, scale, &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_sizes_are_even_sixteen_to_thirty() {
        for size in [16, 18, 20, 22, 24, 26, 28, 30] {
            assert!(is_supported_size(size), "size {size} should be supported");
        }
        for size in [0, 13, 15, 17, 31, 32, 100] {
            assert!(!is_supported_size(size), "size {size} should be rejected");
        }
    }

    #[test]
    fn from_bytes_rejects_junk() {
        let err = FontCatalog::from_bytes(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = FontCatalog::load("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, FontError::Read { .. }));
    }
}
