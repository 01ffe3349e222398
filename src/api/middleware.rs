//! Request instrumentation layer.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::AppState;
use crate::metrics::LatencyTimer;

/// Path excluded from instrumentation so scrapes do not count themselves.
pub const METRICS_PATH: &str = "/metrics";

/// Time the request and count it by method, path and emitted status.
pub async fn track_metrics(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.uri().path() == METRICS_PATH {
        return next.run(request).await;
    }

    let method = request.method().to_string();
    let path = request.uri().path().to_owned();

    let timer = LatencyTimer::start();
    let response = next.run(request).await;

    state.metrics.record_request(
        &method,
        &path,
        response.status().as_u16(),
        timer.elapsed(),
    );

    response
}
