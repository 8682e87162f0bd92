use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::{api, assets};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/show", post(api::show::show))
        .route("/version", get(version_handler))
        .route("/", get(assets::index))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn version_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "app": crate::APP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
