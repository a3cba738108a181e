pub mod handlers;
mod types;

use crate::{config::Config, remote::{BackgroundRemover, RemoteClient}, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::post,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Matches the upload limit the original web client enforces.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub async fn run(config: Config) -> Result<()> {
    // Initialize the remote client
    let remover = RemoteClient::new(config.remote.clone());

    let app = router(Arc::new(remover));

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router around any `BackgroundRemover`.
///
/// Split out from `run` so integration tests can drive the routes with a
/// mocked remover.
pub fn router(remover: Arc<dyn BackgroundRemover>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/remove", post(handlers::remove))
        .route("/download", post(handlers::download))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(handlers::AppState { remover })
}
