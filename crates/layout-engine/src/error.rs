//! Request-level error taxonomy for the layout engine.

use crate::fonts::{MAX_FONT_PX, MIN_FONT_PX};
use crate::qr::QrEncodeError;

/// Errors from validating or rendering a single show request.
///
/// Every variant maps to a user-facing message; none of them abort the
/// service.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The request named a panel other than the connected one.
    #[error("display type mismatch: requested {requested}, connected panel is {connected}")]
    DisplayMismatch { requested: String, connected: String },

    /// The requested font size is outside the preloaded set.
    #[error(
        "font size {0:?} is not available (use \"auto\", 0, or an even size from {min} to {max})",
        min = MIN_FONT_PX,
        max = MAX_FONT_PX
    )]
    FontUnavailable(String),

    /// The payload does not fit any QR symbol at the configured level.
    #[error("QR encoding failed: {0}")]
    Encoding(#[from] QrEncodeError),

    /// Composition produced something the canvas cannot hold.
    #[error("render failed: {0}")]
    Render(String),
}
