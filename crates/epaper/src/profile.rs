//! Display panel profiles and derived per-orientation geometry.
//!
//! A [`DisplayProfile`] describes one physical panel model: pixel grid,
//! active-area millimeters, and the layout constants that differ per model.
//! Everything position-related downstream (QR fit, ruler ticks) is derived
//! from these numbers rather than hard-coded.

/// Broad panel shape class, driving orientation handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Equal-sided panel with a single fixed orientation.
    Square,
    /// Elongated panel usable in landscape or portrait.
    Wide,
}

/// Canvas orientation for wide panels. Square panels ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Fixed rotation applied to a composed canvas before transfer.
///
/// Angles are clockwise, matching the `image` crate's rotation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

/// Which canvas edge the measuring band is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerAnchor {
    Top,
    Bottom,
}

/// Immutable description of one physical e-paper panel model.
///
/// Exactly one profile is active per running instance, chosen at startup
/// from the connected driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayProfile {
    /// Human-readable type identifier requests are matched against.
    pub type_id: &'static str,
    /// Native pixel width.
    pub width_px: u32,
    /// Native pixel height.
    pub height_px: u32,
    /// Active-area width in millimeters.
    pub width_mm: f32,
    /// Active-area height in millimeters.
    pub height_mm: f32,
    pub kind: PanelKind,
    /// Label font size substituted for "auto" requests.
    pub default_font_px: u32,
    /// Margin, in centimeters, reserved around the QR code when fitting it
    /// into the panel's shorter side.
    pub qr_margin_cm: f32,
}

/// Resolved canvas geometry for one profile and orientation.
///
/// Collects the per-orientation constants (dimensions, rotation, ruler
/// placement, pixel density along each canvas axis) in one place so call
/// sites never branch on panel type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub rotation: Rotation,
    pub ruler_anchor: RulerAnchor,
    pub px_per_mm_x: f32,
    pub px_per_mm_y: f32,
    /// Pixels per centimeter along x, rounded to the nearest integer.
    pub px_per_cm_x: u32,
    /// Pixels per centimeter along y, rounded to the nearest integer.
    pub px_per_cm_y: u32,
}

impl Geometry {
    fn new(
        width: u32,
        height: u32,
        px_per_mm_x: f32,
        px_per_mm_y: f32,
        rotation: Rotation,
        ruler_anchor: RulerAnchor,
    ) -> Self {
        Self {
            width,
            height,
            rotation,
            ruler_anchor,
            px_per_mm_x,
            px_per_mm_y,
            px_per_cm_x: (px_per_mm_x * 10.0).round() as u32,
            px_per_cm_y: (px_per_mm_y * 10.0).round() as u32,
        }
    }
}

impl DisplayProfile {
    /// Waveshare 1.54" V2 panel: 200x200 px, 27.60x27.60 mm active area.
    pub const EPD_1IN54: Self = Self {
        type_id: "1.54",
        width_px: 200,
        height_px: 200,
        width_mm: 27.60,
        height_mm: 27.60,
        kind: PanelKind::Square,
        default_font_px: 22,
        qr_margin_cm: 1.5,
    };

    /// Waveshare 2.9" panel: 296x128 px, 66.90x29.06 mm active area.
    pub const EPD_2IN9: Self = Self {
        type_id: "2.9",
        width_px: 296,
        height_px: 128,
        width_mm: 66.90,
        height_mm: 29.06,
        kind: PanelKind::Wide,
        default_font_px: 16,
        qr_margin_cm: 0.5,
    };

    /// Look up a profile by its type identifier.
    pub fn from_type_id(type_id: &str) -> Option<Self> {
        match type_id {
            "1.54" => Some(Self::EPD_1IN54),
            "2.9" => Some(Self::EPD_2IN9),
            _ => None,
        }
    }

    /// Pixels per millimeter along the native x axis.
    pub fn px_per_mm_x(&self) -> f32 {
        self.width_px as f32 / self.width_mm
    }

    /// Pixels per millimeter along the native y axis.
    pub fn px_per_mm_y(&self) -> f32 {
        self.height_px as f32 / self.height_mm
    }

    /// Pixels per centimeter along the native x axis, rounded to nearest.
    pub fn px_per_cm_x(&self) -> u32 {
        (self.px_per_mm_x() * 10.0).round() as u32
    }

    /// Pixels per centimeter along the native y axis, rounded to nearest.
    pub fn px_per_cm_y(&self) -> u32 {
        (self.px_per_mm_y() * 10.0).round() as u32
    }

    /// Largest pixel side a scaled QR bitmap may occupy on this panel.
    ///
    /// The panel's shorter side minus the profile's fit margin converted to
    /// pixels along that same axis.
    pub fn usable_qr_side(&self) -> u32 {
        let (side, px_per_cm) = if self.height_px <= self.width_px {
            (self.height_px, self.px_per_cm_y())
        } else {
            (self.width_px, self.px_per_cm_x())
        };
        let margin = (self.qr_margin_cm * px_per_cm as f32).round() as u32;
        side.saturating_sub(margin)
    }

    /// Resolve the canvas geometry for the given orientation.
    ///
    /// Square panels have one geometry regardless of orientation. Wide
    /// panels swap axes in portrait; landscape anchors the measuring band
    /// to the bottom edge.
    pub fn geometry(&self, orientation: Orientation) -> Geometry {
        match (self.kind, orientation) {
            (PanelKind::Square, _) => Geometry::new(
                self.width_px,
                self.height_px,
                self.px_per_mm_x(),
                self.px_per_mm_y(),
                Rotation::Rotate270,
                RulerAnchor::Top,
            ),
            (PanelKind::Wide, Orientation::Portrait) => Geometry::new(
                self.height_px,
                self.width_px,
                self.px_per_mm_y(),
                self.px_per_mm_x(),
                Rotation::Rotate0,
                RulerAnchor::Top,
            ),
            (PanelKind::Wide, Orientation::Landscape) => Geometry::new(
                self.width_px,
                self.height_px,
                self.px_per_mm_x(),
                self.px_per_mm_y(),
                Rotation::Rotate180,
                RulerAnchor::Bottom,
            ),
        }
    }
}
