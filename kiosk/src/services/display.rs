//! Display owner: exclusive driver access behind a job channel.
//!
//! One worker owns the boxed driver on a blocking task and runs each
//! frame as a full refresh cycle. Channel order serializes transfers, so
//! no other part of the app ever touches the driver.

use std::time::Duration;

use epaper::{frame, EpdDriver, LutMode};
use image::GrayImage;
use tokio::sync::{mpsc, oneshot};

/// Fill byte that clears panel RAM to white.
const CLEAR_BYTE: u8 = 0xFF;

/// Maximum queued frames before submitters see backpressure.
const QUEUE_CAPACITY: usize = 8;

/// Errors surfaced to a frame submitter.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("display worker is gone")]
    WorkerGone,

    #[error("display transfer timed out after {0}s")]
    Timeout(u64),

    #[error(transparent)]
    Epd(#[from] epaper::EpdError),
}

/// One frame waiting for the panel.
struct Job {
    image: GrayImage,
    reply: oneshot::Sender<Result<(), DisplayError>>,
}

/// Handle for submitting frames to the display worker.
#[derive(Clone)]
pub struct DisplayHandle {
    tx: mpsc::Sender<Job>,
}

impl DisplayHandle {
    /// Spawn the worker that owns `driver` and return its handle.
    pub fn spawn(driver: Box<dyn EpdDriver>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::task::spawn_blocking(move || worker_loop(driver, rx));
        Self { tx }
    }

    /// Present one frame, waiting up to `timeout_secs` for the refresh.
    pub async fn present(&self, image: GrayImage, timeout_secs: u64) -> Result<(), DisplayError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Job {
                image,
                reply: reply_tx,
            })
            .await
            .map_err(|_| DisplayError::WorkerGone)?;

        match tokio::time::timeout(Duration::from_secs(timeout_secs), reply_rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(DisplayError::WorkerGone),
            Err(_) => Err(DisplayError::Timeout(timeout_secs)),
        }
    }
}

/// Blocking loop with exclusive driver ownership.
fn worker_loop(mut driver: Box<dyn EpdDriver>, mut rx: mpsc::Receiver<Job>) {
    while let Some(job) = rx.blocking_recv() {
        let result = refresh_cycle(driver.as_mut(), &job.image);
        if let Err(e) = &result {
            tracing::error!("Display refresh failed: {e}");
        }
        let _ = job.reply.send(result);
    }
    tracing::info!("Display worker stopped");
}

/// One full panel refresh: pack, wake, clear, draw, sleep.
///
/// The panel keeps its image without power, so it is put back to sleep
/// after every transfer, including failed ones.
fn refresh_cycle(driver: &mut dyn EpdDriver, image: &GrayImage) -> Result<(), DisplayError> {
    let profile = driver.profile();
    let buf = frame::pack(image, profile.width_px, profile.height_px)?;

    driver.init(LutMode::Full)?;
    let shown = driver.clear(CLEAR_BYTE).and_then(|_| driver.display(&buf));
    let slept = driver.sleep();
    shown?;
    slept?;
    Ok(())
}
