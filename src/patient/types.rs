//! Patient record types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sequential record identifier, starting at 1.
pub type PatientId = u64;

/// A stored patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    /// Full name.
    pub name: String,
    /// Date of birth, conventionally `YYYY-MM-DD`. Stored verbatim.
    #[schema(example = "1990-01-01")]
    pub dob: String,
    /// Known conditions, in submission order.
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// A record together with its assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRecord {
    /// Assigned identifier.
    pub id: PatientId,
    /// The stored fields.
    #[serde(flatten)]
    pub patient: Patient,
}

impl PatientRecord {
    /// Pair a record with its identifier.
    pub fn new(id: PatientId, patient: Patient) -> Self {
        Self { id, patient }
    }
}
