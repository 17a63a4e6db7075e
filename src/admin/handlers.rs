use std::collections::BTreeSet;

use axum::{
    extract::{OriginalUri, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::catalogue::{Diagnostic, ResourceInfo};
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub registry: String,
    pub generation: u64,
    pub url_patterns: usize,
    pub resources: usize,
    pub diagnostics: usize,
}

#[derive(Serialize)]
pub struct ResourceListing {
    pub base_path: String,
    pub generation: u64,
    pub resources: Vec<ResourceInfo>,
}

#[derive(Serialize)]
pub struct RefreshSummary {
    pub generation: u64,
    pub url_patterns: usize,
    pub resources: usize,
    pub diagnostics: usize,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let snapshot = state.catalogue.snapshot();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        registry: state.catalogue.registry_name().to_string(),
        generation: snapshot.generation,
        url_patterns: snapshot.urls.len(),
        resources: snapshot.resources.len(),
        diagnostics: snapshot.diagnostics.len(),
    })
}

/// The path this router is mounted under, e.g. `/console` when nested there.
fn mount_prefix(original: &Uri, local: &Uri) -> String {
    original
        .path()
        .strip_suffix(local.path())
        .unwrap_or_default()
        .to_string()
}

/// Configured base path, or the request's mount prefix when none is configured.
fn resolve_base_path(configured: Option<&str>, original: &Uri, local: &Uri) -> String {
    configured
        .map(str::to_string)
        .unwrap_or_else(|| mount_prefix(original, local))
}

pub async fn get_resources(
    State(state): State<AppState>,
    OriginalUri(original): OriginalUri,
    uri: Uri,
) -> Json<ResourceListing> {
    let snapshot = state.catalogue.snapshot();
    let base_path = resolve_base_path(state.base_path.as_deref(), &original, &uri);

    Json(ResourceListing {
        base_path,
        generation: snapshot.generation,
        resources: snapshot.resources.clone(),
    })
}

pub async fn get_urls(State(state): State<AppState>) -> Json<BTreeSet<String>> {
    Json(state.catalogue.url_patterns())
}

pub async fn get_diagnostics(State(state): State<AppState>) -> Json<Vec<Diagnostic>> {
    Json(state.catalogue.snapshot().diagnostics.clone())
}

pub async fn post_refresh(State(state): State<AppState>) -> Response {
    let catalogue = state.catalogue.clone();
    match tokio::task::spawn_blocking(move || catalogue.refresh()).await {
        Ok(Ok(snapshot)) => Json(RefreshSummary {
            generation: snapshot.generation,
            url_patterns: snapshot.urls.len(),
            resources: snapshot.resources.len(),
            diagnostics: snapshot.diagnostics.len(),
        })
        .into_response(),
        Ok(Err(e)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Refresh task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
