//! Kiosk display server binary.
//!
//! Loads configuration, spawns the display worker, optionally shows the
//! boot splash, then serves HTTP until Ctrl+C.

use tracing_subscriber::EnvFilter;

use eink_kiosk::app::SharedState;
use eink_kiosk::config::AppConfig;
use eink_kiosk::{server, services, APP_NAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting {APP_NAME}");

    let config = AppConfig::load()?;
    let state = SharedState::new(config)?;

    if state.config().splash {
        services::splash::show_splash(&state).await;
    }

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    tracing::info!(
        port = state.server_port(),
        panel = state.profile().type_id,
        "Kiosk server running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.shutdown_token().cancel();
    let _ = server_handle.await;
    Ok(())
}
