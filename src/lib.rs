//! Minimal patient record service.
//!
//! Accepts patient records over HTTP, keeps them in memory, serves them back
//! by id and exposes request counts and latency in Prometheus format.
//!
//! ```text
//! POST /patients      {"name": "Ann", "dob": "1990-01-01"}
//!                  -> {"id": 1, "name": "Ann", "dob": "1990-01-01", "conditions": []}
//! GET  /patients/1 -> same body
//! GET  /patients/2 -> 404 {"detail": "not found"}
//! ```
//!
//! Nothing is persisted: records live until the process exits.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`patient`]: Record types and the in-memory store
//! - [`metrics`]: Request counters and latency histogram
//! - [`api`]: HTTP router, handlers and instrumentation
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod patient;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, EmrError, Result};
