//! Layout engine: QR, labels, and scale composed onto a panel canvas.

use epaper::{DisplayProfile, Orientation, RulerAnchor};

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::fonts::TextRenderer;
use crate::qr::{EcLevel, QrEncoder};
use crate::request::RenderRequest;
use crate::ruler;

/// Clearance kept between drawn regions and canvas edges.
pub const EDGE_MARGIN_PX: u32 = 3;

/// Largest whole-pixel module scale that keeps a symbol of `module_count`
/// modules inside `usable_side`, never below 1.
pub fn fit_magnification(usable_side: u32, module_count: u32) -> u32 {
    (usable_side / module_count.max(1)).max(1)
}

/// A composed frame plus the facts worth reporting about it.
#[derive(Debug)]
pub struct RenderOutput {
    /// Canvas in the panel's transfer orientation.
    pub canvas: Canvas,
    /// Version and level designator of the encoded symbol, e.g. "3-H".
    pub designator: String,
    /// Pixels per module the symbol was scaled by.
    pub magnification: u32,
}

/// Composes show requests into transfer-ready canvases.
///
/// Owns the connected panel's profile and the encoder and text seams; one
/// engine lives for the whole process, shared behind the app state.
pub struct LayoutEngine {
    profile: DisplayProfile,
    encoder: Box<dyn QrEncoder>,
    text: Box<dyn TextRenderer>,
    ec_level: EcLevel,
    ruler_width_cm: u32,
}

impl LayoutEngine {
    pub fn new(
        profile: DisplayProfile,
        encoder: Box<dyn QrEncoder>,
        text: Box<dyn TextRenderer>,
        ec_level: EcLevel,
        ruler_width_cm: u32,
    ) -> Self {
        Self {
            profile,
            encoder,
            text,
            ec_level,
            ruler_width_cm,
        }
    }

    /// Profile of the panel this engine lays out for.
    pub fn profile(&self) -> DisplayProfile {
        self.profile
    }

    /// Borrow the text renderer.
    pub fn text(&self) -> &dyn TextRenderer {
        self.text.as_ref()
    }

    /// Render a request into a frame in the panel's transfer orientation.
    ///
    /// Validation runs strictly before encoding: a mismatched display type
    /// or an unavailable font size fails without touching the encoder.
    pub fn render(&self, req: &RenderRequest) -> Result<RenderOutput, RenderError> {
        let requested = req.display_type.as_deref().unwrap_or(self.profile.type_id);
        if !requested.starts_with(self.profile.type_id) {
            return Err(RenderError::DisplayMismatch {
                requested: requested.to_owned(),
                connected: self.profile.type_id.to_owned(),
            });
        }

        let font = self.resolve_font(req.font_size.as_deref())?;

        let orientation = if requested.ends_with('P') {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        };
        let geometry = self.profile.geometry(orientation);

        let symbol = self.encoder.encode(&req.payload, self.ec_level)?;
        let magnification = fit_magnification(self.profile.usable_qr_side(), symbol.module_count());
        let qr = symbol.rasterize(magnification, 0);
        let qr_side = qr.width();

        tracing::debug!(
            designator = symbol.designator(),
            modules = symbol.module_count(),
            magnification,
            side = qr_side,
            "QR symbol scaled for panel"
        );

        let mut canvas = Canvas::new(geometry.width, geometry.height);
        let show_ruler = req.scale_mode.as_deref().is_some_and(|s| s != "none");
        let band_h = geometry.px_per_cm_y / 2;

        // The band either consumes vertical space above the QR or sits
        // beside it along the bottom edge; labels follow the same side.
        let (qr_x, qr_y, label_x, label_y) = match geometry.ruler_anchor {
            RulerAnchor::Top => {
                let mut extent = 0;
                if show_ruler {
                    ruler::draw_ruler(
                        &mut canvas,
                        EDGE_MARGIN_PX,
                        EDGE_MARGIN_PX,
                        band_h,
                        self.ruler_width_cm,
                        &geometry,
                    );
                    extent = EDGE_MARGIN_PX + band_h;
                }
                let qr_y = EDGE_MARGIN_PX + extent;
                (
                    EDGE_MARGIN_PX,
                    qr_y,
                    EDGE_MARGIN_PX,
                    qr_y + qr_side + EDGE_MARGIN_PX,
                )
            }
            RulerAnchor::Bottom => {
                let side_x = EDGE_MARGIN_PX + qr_side + EDGE_MARGIN_PX;
                if show_ruler {
                    let ruler_y = geometry.height.saturating_sub(EDGE_MARGIN_PX + band_h);
                    ruler::draw_ruler(
                        &mut canvas,
                        side_x,
                        ruler_y,
                        band_h,
                        self.ruler_width_cm,
                        &geometry,
                    );
                }
                (EDGE_MARGIN_PX, EDGE_MARGIN_PX, side_x, EDGE_MARGIN_PX)
            }
        };

        if qr_x + qr_side > geometry.width || qr_y + qr_side > geometry.height {
            return Err(RenderError::Render(format!(
                "QR symbol needs {qr_side}px at minimum scale but only {}x{} is free",
                geometry.width.saturating_sub(qr_x),
                geometry.height.saturating_sub(qr_y),
            )));
        }

        if let Some((size_px, line_h)) = font {
            let mut y = label_y;
            for line in &req.labels {
                self.text
                    .draw(canvas.image_mut(), label_x as i32, y as i32, size_px, line);
                y += line_h;
            }
        }

        canvas.paste_dark(&qr, qr_x, qr_y);

        Ok(RenderOutput {
            canvas: canvas.rotated(geometry.rotation),
            designator: symbol.designator().to_owned(),
            magnification,
        })
    }

    /// Resolve a font-size token to (size, line height); `None` means size
    /// 0, which skips labels entirely.
    fn resolve_font(&self, token: Option<&str>) -> Result<Option<(u32, u32)>, RenderError> {
        let token = token.unwrap_or("auto");
        let size_px = if token == "auto" {
            self.profile.default_font_px
        } else {
            token
                .parse::<u32>()
                .map_err(|_| RenderError::FontUnavailable(token.to_owned()))?
        };
        if size_px == 0 {
            return Ok(None);
        }
        match self.text.line_height(size_px) {
            Some(line_h) => Ok(Some((size_px, line_h))),
            None => Err(RenderError::FontUnavailable(token.to_owned())),
        }
    }
}
