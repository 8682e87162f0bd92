//! QR layout composition for monochrome e-paper panels.
//!
//! Turns a show request (payload, labels, panel type, font and scale
//! options) into a rotated 1-bit canvas ready for packing: the QR symbol
//! scaled to the panel, label lines beside or below it, and an optional
//! true-to-size measuring band.

pub mod canvas;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod qr;
pub mod request;
pub mod ruler;

// Re-exports for convenience
pub use canvas::Canvas;
pub use engine::{fit_magnification, LayoutEngine, RenderOutput, EDGE_MARGIN_PX};
pub use error::RenderError;
pub use fonts::{FontCatalog, FontError, TextRenderer};
pub use qr::{EcLevel, QrCodeEncoder, QrEncodeError, QrEncoder, QrSymbol};
pub use request::RenderRequest;
pub use ruler::draw_ruler;
