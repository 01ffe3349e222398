//! Patient records module.
//!
//! This module handles:
//! - Record types and their wire shape
//! - The in-memory record store

pub mod store;
pub mod types;

pub use store::PatientStore;
pub use types::{Patient, PatientId, PatientRecord};
