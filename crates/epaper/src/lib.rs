//! E-paper panel abstraction for the kiosk display server.
//!
//! Provides panel profiles (pixel and physical geometry), the driver
//! capability trait with simulator and no-op implementations, and 1-bit
//! frame buffer packing.

pub mod driver;
pub mod frame;
pub mod profile;

// Re-exports for convenience
pub use driver::{DriverOp, EpdDriver, NullDriver, SimulatorDriver};
pub use profile::{DisplayProfile, Geometry, Orientation, PanelKind, Rotation, RulerAnchor};

/// Panel refresh mode selecting the waveform lookup table.
///
/// `Full` redraws the whole panel (slow, no ghosting); `Partial` refreshes
/// only changed regions where the controller supports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutMode {
    Full,
    Partial,
}

/// Errors that can occur at the driver boundary.
#[derive(Debug, thiserror::Error)]
pub enum EpdError {
    #[error("driver not initialized (init is required after power-on or sleep)")]
    NotInitialized,

    #[error("frame is {actual_w}x{actual_h} but the panel is {width}x{height}")]
    FrameSize {
        width: u32,
        height: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error("device buffer is {actual} bytes but the panel expects {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, EpdError>;
