//! HTTP API module: patient records, health, metrics and docs.

pub mod docs;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
