use std::sync::Arc;

use anyhow::Context;
use epaper::{DisplayProfile, EpdDriver, NullDriver, SimulatorDriver};
use layout_engine::{FontCatalog, LayoutEngine, QrCodeEncoder};
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, DriverChoice};
use crate::services::display::DisplayHandle;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    engine: LayoutEngine,
    display: DisplayHandle,
    shutdown: CancellationToken,
}

impl SharedState {
    /// Build the full state for the loaded config: label font, layout
    /// engine, and the display worker owning the configured driver.
    ///
    /// A missing or unreadable font is fatal here; nothing can be drawn
    /// without it.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let catalog = FontCatalog::load(&config.font_path)
            .with_context(|| format!("loading label font {}", config.font_path.display()))?;
        let display = DisplayHandle::spawn(build_driver(&config));
        let engine = LayoutEngine::new(
            config.profile,
            Box::new(QrCodeEncoder),
            Box::new(catalog),
            config.error_correction,
            config.ruler_width_cm,
        );
        Ok(Self::from_parts(config, engine, display))
    }

    /// Assemble state from prebuilt parts.
    pub fn from_parts(config: AppConfig, engine: LayoutEngine, display: DisplayHandle) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                engine,
                display,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.inner.engine
    }

    pub fn display(&self) -> &DisplayHandle {
        &self.inner.display
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn profile(&self) -> DisplayProfile {
        self.inner.engine.profile()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}

fn build_driver(config: &AppConfig) -> Box<dyn EpdDriver> {
    match config.display_driver {
        DriverChoice::Sim => {
            let driver = SimulatorDriver::new(config.profile);
            match &config.sim_output_dir {
                Some(dir) => Box::new(driver.with_dump_dir(dir)),
                None => Box::new(driver),
            }
        }
        DriverChoice::Noop => Box::new(NullDriver::new(config.profile)),
    }
}
