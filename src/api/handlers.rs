//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use super::extract::{AppJson, AppPath};
use crate::error::{ApiError, NotFoundBody, ValidationErrorBody};
use crate::metrics::{HttpMetrics, CONTENT_TYPE_LATEST};
use crate::patient::{Patient, PatientId, PatientRecord, PatientStore};

/// Path the root URL redirects to.
pub const DOCS_PATH: &str = "/docs";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Patient records.
    pub store: Arc<PatientStore>,
    /// Request metrics.
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    /// Create new app state with an empty store.
    pub fn new(metrics: HttpMetrics) -> Self {
        Self {
            store: Arc::new(PatientStore::new()),
            metrics: Arc::new(metrics),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Store a new patient record.
#[utoipa::path(
    post,
    path = "/patients",
    tag = "patients",
    request_body = Patient,
    responses(
        (status = 200, description = "Record created", body = PatientRecord),
        (status = 422, description = "Malformed body", body = ValidationErrorBody)
    )
)]
pub async fn create_patient(
    State(state): State<AppState>,
    AppJson(patient): AppJson<Patient>,
) -> Json<PatientRecord> {
    let record = state.store.create(patient).await;
    info!(id = record.id, "stored patient record");
    Json(record)
}

/// Fetch a patient record by id.
#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "patients",
    params(("id" = u64, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record found", body = PatientRecord),
        (status = 404, description = "No such record", body = NotFoundBody),
        (status = 422, description = "Identifier is not an integer", body = ValidationErrorBody)
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    AppPath(id): AppPath<PatientId>,
) -> Result<Json<PatientRecord>, ApiError> {
    let patient = state.store.get(id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(PatientRecord::new(id, patient)))
}

/// Prometheus scrape endpoint.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "health",
    responses((status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain"))
)]
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, CONTENT_TYPE_LATEST)],
        state.metrics.render(),
    )
}

/// Root URL sends browsers to the API docs.
pub async fn root() -> Redirect {
    Redirect::temporary(DOCS_PATH)
}

/// Favicon stub.
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
