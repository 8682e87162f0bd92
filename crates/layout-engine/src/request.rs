//! Show-request parameters, decoupled from the HTTP form encoding.

/// One request to render a QR layout.
///
/// Built by the HTTP layer from form fields; defaults for the optional
/// fields are resolved inside the engine so tests can drive it directly.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Payload encoded into the QR symbol.
    pub payload: String,
    /// Label lines drawn next to the symbol, in order.
    pub labels: Vec<String>,
    /// Desired panel type, e.g. "1.54", "2.9" or "2.9P" for portrait.
    /// `None` means the connected panel.
    pub display_type: Option<String>,
    /// Font size token: "auto", "0" (no labels) or an even size 16..=30.
    pub font_size: Option<String>,
    /// Anything other than "none" draws the measuring scale.
    pub scale_mode: Option<String>,
}

impl RenderRequest {
    /// Request with just a payload, everything else at defaults.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            ..Self::default()
        }
    }

    /// Split a newline-delimited form value into label lines.
    ///
    /// Interior empty lines are kept; they advance the cursor when drawn.
    pub fn split_labels(text: &str) -> Vec<String> {
        text.lines().map(str::to_owned).collect()
    }
}
