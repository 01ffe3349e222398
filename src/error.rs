//! Unified error types for the record service.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Startup and infrastructure errors.
#[derive(Error, Debug)]
pub enum EmrError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics recorder could not be built.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body or path parameter did not match the expected shape.
    #[error("validation failed at {loc}: {msg}")]
    Validation {
        /// Where the bad input was found ("body" or "path").
        loc: &'static str,
        /// Human-readable reason.
        msg: String,
    },

    /// No record exists for the requested identifier.
    #[error("not found")]
    NotFound,
}

/// One entry of a validation error payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ValidationDetail {
    /// Location of the offending input.
    pub loc: Vec<String>,
    /// Reason the input was rejected.
    pub msg: String,
    /// Error category.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of a 422 response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ValidationErrorBody {
    /// One entry per rejected input.
    pub detail: Vec<ValidationDetail>,
}

/// Body of a 404 response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NotFoundBody {
    /// Always "not found".
    pub detail: String,
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation { loc, msg } => {
                let body = ValidationErrorBody {
                    detail: vec![ValidationDetail {
                        loc: vec![loc.to_string()],
                        msg,
                        kind: "value_error".to_string(),
                    }],
                };
                (status, Json(body)).into_response()
            }
            Self::NotFound => (
                status,
                Json(NotFoundBody {
                    detail: "not found".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            loc: "body",
            msg: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation {
            loc: "path",
            msg: rejection.body_text(),
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, EmrError>;
