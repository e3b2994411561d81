//! Request handlers: direct passthroughs to store list operations.

use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mcphub_core::{EntryKind, HubError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

type HandlerError = (StatusCode, Json<Value>);

/// Optional scoping of entry listings to one registry by name.
#[derive(Debug, Deserialize)]
pub struct EntryFilter {
    pub registry: Option<String>,
}

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn handle_registries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    let registries = state.store.list_registries().map_err(internal_error)?;
    Ok(Json(json!(registries)))
}

pub async fn handle_servers(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Value>, HandlerError> {
    list_entries(&state, EntryKind::Server, filter.registry.as_deref())
}

pub async fn handle_skills(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Value>, HandlerError> {
    list_entries(&state, EntryKind::Skill, filter.registry.as_deref())
}

pub async fn handle_installations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    let installations = state.store.list_installations().map_err(internal_error)?;
    Ok(Json(json!(installations)))
}

fn list_entries(
    state: &AppState,
    kind: EntryKind,
    registry: Option<&str>,
) -> Result<Json<Value>, HandlerError> {
    let registry_id = match registry {
        Some(name) => {
            let registry = state
                .store
                .get_registry(name)
                .map_err(internal_error)?
                .ok_or_else(|| {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": format!("registry not found: {}", name)})),
                    )
                })?;
            Some(registry.id)
        }
        None => None,
    };

    let entries = state
        .store
        .list_entries(kind, registry_id.as_deref())
        .map_err(internal_error)?;
    Ok(Json(json!(entries)))
}

fn internal_error(err: HubError) -> HandlerError {
    error!("Store error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": err.to_string()})),
    )
}
