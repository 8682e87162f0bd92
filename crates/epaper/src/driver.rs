//! Driver boundary for the physical panel.
//!
//! The vendor SPI driver is an external collaborator; everything above this
//! crate talks to [`EpdDriver`] instead. [`SimulatorDriver`] stands in for
//! real hardware during development, [`NullDriver`] for tests.

use std::path::PathBuf;

use crate::{frame, DisplayProfile, EpdError, LutMode};

/// Panel operations in the order the hardware expects them.
///
/// A transfer cycle is init, clear, display, sleep. The panel keeps its
/// image without power, so sleeping after every transfer is safe and spares
/// the screen; `init` wakes it back up.
pub trait EpdDriver: Send {
    /// Profile of the connected panel.
    fn profile(&self) -> DisplayProfile;

    /// Power the panel up and load the given waveform table.
    fn init(&mut self, lut: LutMode) -> crate::Result<()>;

    /// Fill panel RAM with a single byte (0xFF clears to white).
    fn clear(&mut self, fill: u8) -> crate::Result<()>;

    /// Transfer a packed frame and refresh. Blocks until the refresh is done.
    fn display(&mut self, buf: &[u8]) -> crate::Result<()>;

    /// Enter deep sleep. `init` is required before the next transfer.
    fn sleep(&mut self) -> crate::Result<()>;
}

/// In-process stand-in for a panel, with the real driver's lifecycle rules.
///
/// Transfers are validated and logged, and can optionally be dumped as PNG
/// files to inspect what the panel would have shown.
pub struct SimulatorDriver {
    profile: DisplayProfile,
    dump_dir: Option<PathBuf>,
    awake: bool,
    frames: u64,
}

impl SimulatorDriver {
    pub fn new(profile: DisplayProfile) -> Self {
        Self {
            profile,
            dump_dir: None,
            awake: false,
            frames: 0,
        }
    }

    /// Write every displayed frame as `frame-NNNN.png` under `dir`.
    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }
}

impl EpdDriver for SimulatorDriver {
    fn profile(&self) -> DisplayProfile {
        self.profile
    }

    fn init(&mut self, lut: LutMode) -> crate::Result<()> {
        tracing::info!(panel = self.profile.type_id, ?lut, "Simulated panel init");
        self.awake = true;
        Ok(())
    }

    fn clear(&mut self, fill: u8) -> crate::Result<()> {
        if !self.awake {
            return Err(EpdError::NotInitialized);
        }
        tracing::debug!(fill, "Simulated panel clear");
        Ok(())
    }

    fn display(&mut self, buf: &[u8]) -> crate::Result<()> {
        if !self.awake {
            return Err(EpdError::NotInitialized);
        }
        let expected = frame::buffer_len(self.profile.width_px, self.profile.height_px);
        if buf.len() != expected {
            return Err(EpdError::BufferSize {
                expected,
                actual: buf.len(),
            });
        }
        self.frames += 1;
        tracing::info!(
            panel = self.profile.type_id,
            frame = self.frames,
            bytes = buf.len(),
            "Simulated panel refresh"
        );
        if let Some(dir) = &self.dump_dir {
            let path = dir.join(format!("frame-{:04}.png", self.frames));
            match frame::unpack(buf, self.profile.width_px, self.profile.height_px) {
                Ok(img) => {
                    if let Err(e) = img.save(&path) {
                        tracing::warn!(path = %path.display(), "Frame dump failed: {e}");
                    }
                }
                Err(e) => tracing::warn!("Frame dump failed: {e}"),
            }
        }
        Ok(())
    }

    fn sleep(&mut self) -> crate::Result<()> {
        tracing::debug!(panel = self.profile.type_id, "Simulated panel sleep");
        self.awake = false;
        Ok(())
    }
}

/// One recorded driver call, for asserting sequences in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOp {
    Init(LutMode),
    Clear(u8),
    /// Byte length of the transferred frame.
    Display(usize),
    Sleep,
}

/// Driver that accepts every call and records the sequence.
pub struct NullDriver {
    profile: DisplayProfile,
    ops: Vec<DriverOp>,
}

impl NullDriver {
    pub fn new(profile: DisplayProfile) -> Self {
        Self {
            profile,
            ops: Vec::new(),
        }
    }

    /// Calls seen so far, oldest first.
    pub fn ops(&self) -> &[DriverOp] {
        &self.ops
    }
}

impl EpdDriver for NullDriver {
    fn profile(&self) -> DisplayProfile {
        self.profile
    }

    fn init(&mut self, lut: LutMode) -> crate::Result<()> {
        self.ops.push(DriverOp::Init(lut));
        Ok(())
    }

    fn clear(&mut self, fill: u8) -> crate::Result<()> {
        self.ops.push(DriverOp::Clear(fill));
        Ok(())
    }

    fn display(&mut self, buf: &[u8]) -> crate::Result<()> {
        self.ops.push(DriverOp::Display(buf.len()));
        Ok(())
    }

    fn sleep(&mut self) -> crate::Result<()> {
        self.ops.push(DriverOp::Sleep);
        Ok(())
    }
}
