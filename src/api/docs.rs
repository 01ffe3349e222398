//! OpenAPI document for the service.

use utoipa::OpenApi;

use super::handlers;
use crate::error::{NotFoundBody, ValidationDetail, ValidationErrorBody};
use crate::patient::{Patient, PatientRecord};

/// Path the OpenAPI JSON document is served at.
pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Mini EMR", description = "In-memory patient records"),
    paths(
        handlers::health,
        handlers::create_patient,
        handlers::get_patient,
        handlers::metrics
    ),
    components(schemas(
        handlers::HealthResponse,
        Patient,
        PatientRecord,
        NotFoundBody,
        ValidationDetail,
        ValidationErrorBody
    )),
    tags(
        (name = "patients", description = "Patient records"),
        (name = "health", description = "Liveness and metrics")
    )
)]
pub struct ApiDoc;
