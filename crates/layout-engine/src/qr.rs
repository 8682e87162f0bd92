//! QR symbol encoding behind a trait seam.
//!
//! The engine depends on [`QrEncoder`] so layout tests can count or fake
//! encodings; [`QrCodeEncoder`] is the real implementation backed by the
//! `qrcode` crate.

use image::{GrayImage, Luma};
use qrcode::QrCode;

/// Error-correction level for encoded symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    L,
    M,
    Q,
    #[default]
    H,
}

impl EcLevel {
    /// Parse a single-letter level token, case-insensitive.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "L" => Some(Self::L),
            "M" => Some(Self::M),
            "Q" => Some(Self::Q),
            "H" => Some(Self::H),
            _ => None,
        }
    }

    /// Single-letter form used in symbol designators.
    pub fn letter(&self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }
}

/// Failure to produce a QR symbol for a payload.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct QrEncodeError(String);

impl QrEncodeError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<qrcode::types::QrError> for QrEncodeError {
    fn from(e: qrcode::types::QrError) -> Self {
        Self(e.to_string())
    }
}

/// An encoded QR symbol: the dark-module matrix plus its designator.
///
/// Rasterization is separate from encoding so the pixel scale stays a pure
/// function of the symbol and the panel.
#[derive(Debug, Clone)]
pub struct QrSymbol {
    module_count: u32,
    designator: String,
    dark: Vec<bool>,
}

impl QrSymbol {
    /// Build a symbol from a row-major dark-module matrix.
    pub fn new(module_count: u32, designator: impl Into<String>, dark: Vec<bool>) -> Self {
        debug_assert_eq!(dark.len(), (module_count * module_count) as usize);
        Self {
            module_count,
            designator: designator.into(),
            dark,
        }
    }

    /// Modules per side.
    pub fn module_count(&self) -> u32 {
        self.module_count
    }

    /// Version and level designator, e.g. "3-H" or "M4-L".
    pub fn designator(&self) -> &str {
        &self.designator
    }

    /// Whether the module at (x, y) is dark.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        self.dark[(y * self.module_count + x) as usize]
    }

    /// Expand the matrix into a monochrome bitmap.
    ///
    /// Each module becomes a square of `magnification` pixels;
    /// `border_modules` adds a white quiet zone on every side.
    pub fn rasterize(&self, magnification: u32, border_modules: u32) -> GrayImage {
        let side = (self.module_count + 2 * border_modules) * magnification;
        let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

        for y in 0..self.module_count {
            for x in 0..self.module_count {
                if !self.is_dark(x, y) {
                    continue;
                }
                let px = (x + border_modules) * magnification;
                let py = (y + border_modules) * magnification;
                for dx in 0..magnification {
                    for dy in 0..magnification {
                        img.put_pixel(px + dx, py + dy, Luma([0u8]));
                    }
                }
            }
        }

        img
    }
}

/// Capability to encode payloads into QR symbols.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, payload: &str, level: EcLevel) -> Result<QrSymbol, QrEncodeError>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Default)]
pub struct QrCodeEncoder;

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, payload: &str, level: EcLevel) -> Result<QrSymbol, QrEncodeError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), to_qrcode_level(level))?;
        let module_count = code.width() as u32;
        let designator = match code.version() {
            qrcode::Version::Normal(n) => format!("{n}-{}", level.letter()),
            qrcode::Version::Micro(n) => format!("M{n}-{}", level.letter()),
        };
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        Ok(QrSymbol::new(module_count, designator, dark))
    }
}

fn to_qrcode_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}
