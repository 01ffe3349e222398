//! HTTP API route definitions.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::{ApiDoc, OPENAPI_PATH};
use super::handlers::{
    create_patient, favicon, get_patient, health, metrics, root, AppState, DOCS_PATH,
};
use super::middleware::{track_metrics, METRICS_PATH};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/healthz", get(health))
        .route("/patients", post(create_patient))
        .route("/patients/:id", get(get_patient))
        .route(METRICS_PATH, get(metrics))
        .route("/", get(root))
        .route("/favicon.ico", get(favicon))
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()));

    instrument(routes, state)
}

/// Wrap routes in the shared layer stack and bind the state.
///
/// Layer order, outermost first: tracing, metrics, panic recovery. A
/// panicking handler therefore still produces a counted 500.
fn instrument(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn_with_state(state.clone(), track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
