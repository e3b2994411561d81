//! HTTP server implementation using Axum.

use crate::handler::{
    handle_health, handle_installations, handle_registries, handle_servers, handle_skills,
};
use axum::{routing::get, Router};
use mcphub_core::HubStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    /// Local store the endpoints read from.
    pub store: HubStore,
}

/// Start the read-only HTTP API server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(store: HubStore, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let state = Arc::new(AppState { store });

    // Permissive CORS: the API is localhost-only and read-only.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/v1/registries", get(handle_registries))
        .route("/v1/servers", get(handle_servers))
        .route("/v1/skills", get(handle_skills))
        .route("/v1/installations", get(handle_installations))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    Ok(actual_addr)
}
