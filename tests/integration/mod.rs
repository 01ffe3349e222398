//! Integration tests for the patient record service.
//!
//! Every test drives a freshly built router in-process, so each one sees
//! an empty store and its own metrics registry.

use std::collections::HashSet;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use mini_emr::api::{create_router, AppState};
use mini_emr::metrics::HttpMetrics;

fn app() -> Router {
    let metrics = HttpMetrics::new().expect("metrics recorder");
    create_router(AppState::new(metrics))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_patient(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/patients")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// POST, fetch, and miss on the next id.
#[tokio::test]
async fn test_create_fetch_and_miss() {
    let app = app();

    let created = send(&app, post_patient(json!({"name": "Ann", "dob": "1990-01-01"}))).await;
    assert_eq!(created.status(), StatusCode::OK);
    let expected = json!({"id": 1, "name": "Ann", "dob": "1990-01-01", "conditions": []});
    assert_eq!(body_json(created).await, expected);

    let fetched = send(&app, get("/patients/1")).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await, expected);

    let missing = send(&app, get("/patients/2")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(missing).await, json!({"detail": "not found"}));
}

/// Conditions keep their submitted order.
#[tokio::test]
async fn test_conditions_preserve_order() {
    let app = app();

    let created = send(
        &app,
        post_patient(json!({"name": "Bo", "dob": "2001-12-31", "conditions": ["x", "y"]})),
    )
    .await;
    let body = body_json(created).await;
    assert_eq!(body["conditions"], json!(["x", "y"]));

    let fetched = body_json(send(&app, get("/patients/1")).await).await;
    assert_eq!(fetched, body);
}

/// Any dob string is accepted as-is.
#[tokio::test]
async fn test_dob_is_not_validated() {
    let app = app();

    let created = send(&app, post_patient(json!({"name": "Cy", "dob": "not-a-date"}))).await;
    assert_eq!(created.status(), StatusCode::OK);
    assert_eq!(body_json(created).await["dob"], "not-a-date");
}

/// A rejected create does not consume an id.
#[tokio::test]
async fn test_rejected_create_does_not_skip_ids() {
    let app = app();

    let first = body_json(send(&app, post_patient(json!({"name": "A", "dob": "1990-01-01"}))).await).await;
    assert_eq!(first["id"], 1);

    let rejected = send(&app, post_patient(json!({"dob": "1990-01-01"}))).await;
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let wrong_type = send(&app, post_patient(json!({"name": 5, "dob": "1990-01-01"}))).await;
    assert_eq!(wrong_type.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let second = body_json(send(&app, post_patient(json!({"name": "B", "dob": "1990-01-01"}))).await).await;
    assert_eq!(second["id"], 2);
}

/// Ids never issued are always 404.
#[tokio::test]
async fn test_never_issued_ids_are_not_found() {
    let app = app();
    send(&app, post_patient(json!({"name": "A", "dob": "1990-01-01"}))).await;

    for uri in ["/patients/0", "/patients/2", "/patients/18446744073709551615"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(response).await, json!({"detail": "not found"}));
    }
}

/// Negative and non-numeric ids are rejected before lookup.
#[tokio::test]
async fn test_bad_path_ids_are_unprocessable() {
    let app = app();

    for uri in ["/patients/-1", "/patients/one", "/patients/1.5"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

/// N concurrent creates receive exactly the ids 1..=N.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_yield_unique_ids() {
    const N: u64 = 100;
    let app = app();

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let request = post_patient(json!({"name": format!("p{i}"), "dob": "1990-01-01"}));
                let response = app.oneshot(request).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);
                body_json(response).await["id"].as_u64().unwrap()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()), "duplicate id");
    }
    assert_eq!(ids, (1..=N).collect::<HashSet<_>>());
}

/// Health checks are counted; scrapes are not.
#[tokio::test]
async fn test_metrics_count_health_checks() {
    let app = app();

    for _ in 0..3 {
        let response = send(&app, get("/healthz")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    // Scraping twice must not count the first scrape.
    send(&app, get("/metrics")).await;
    let response = send(&app, get("/metrics")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; version=0.0.4; charset=utf-8"
    );

    let text = body_text(response).await;
    assert!(text.contains(r#"http_requests_total{method="GET",path="/healthz",status="200"} 3"#));
    assert!(text.contains("http_request_duration_seconds_count 3"));
    assert!(!text.contains(r#"path="/metrics""#));
}

/// Error statuses are recorded with the status actually sent.
#[tokio::test]
async fn test_metrics_record_error_statuses() {
    let app = app();

    send(&app, get("/patients/1")).await;
    send(&app, post_patient(json!({"dob": "1990-01-01"}))).await;
    send(&app, get("/favicon.ico")).await;
    send(&app, get("/")).await;

    let text = body_text(send(&app, get("/metrics")).await).await;
    assert!(text.contains(r#"http_requests_total{method="GET",path="/patients/1",status="404"} 1"#));
    assert!(text.contains(r#"http_requests_total{method="POST",path="/patients",status="422"} 1"#));
    assert!(text.contains(r#"http_requests_total{method="GET",path="/favicon.ico",status="204"} 1"#));
    assert!(text.contains(r#"http_requests_total{method="GET",path="/",status="307"} 1"#));
    assert!(text.contains("http_request_duration_seconds_count 4"));
}

/// Unknown routes fall through to a counted 404.
#[tokio::test]
async fn test_unknown_route_is_counted() {
    let app = app();

    let response = send(&app, get("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let text = body_text(send(&app, get("/metrics")).await).await;
    assert!(text.contains(r#"http_requests_total{method="GET",path="/nope",status="404"} 1"#));
}

/// The docs UI is reachable where the root redirects.
#[tokio::test]
async fn test_docs_are_served() {
    let app = app();

    let root = send(&app, get("/")).await;
    assert_eq!(root.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(root.headers()[header::LOCATION], "/docs");

    let index = send(&app, get("/docs/")).await;
    assert_eq!(index.status(), StatusCode::OK);

    let openapi = send(&app, get("/openapi.json")).await;
    assert_eq!(openapi.status(), StatusCode::OK);
    let doc = body_json(openapi).await;
    assert_eq!(doc["info"]["title"], "Mini EMR");
}
