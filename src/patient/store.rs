//! In-memory patient record store.
//!
//! Records are immutable once created and live until the process exits.
//! There is no eviction and no size bound.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

use super::types::{Patient, PatientId, PatientRecord};

#[derive(Debug)]
struct Inner {
    next_id: PatientId,
    records: HashMap<PatientId, Patient>,
}

/// Thread-safe record store with sequential id assignment.
#[derive(Debug)]
pub struct PatientStore {
    // Counter and map share one lock: an id is consumed only together with its insert.
    inner: Mutex<Inner>,
}

impl PatientStore {
    /// Create an empty store; the first record gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                records: HashMap::new(),
            }),
        }
    }

    /// Insert a record and return it together with its newly assigned id.
    pub async fn create(&self, patient: Patient) -> PatientRecord {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.records.insert(id, patient.clone());
        inner.next_id += 1;
        drop(inner);

        debug!(id, "patient created");
        PatientRecord::new(id, patient)
    }

    /// Look up a record by id.
    pub async fn get(&self, id: PatientId) -> Option<Patient> {
        self.inner.lock().await.records.get(&id).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    /// Whether no record has been created yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for PatientStore {
    fn default() -> Self {
        Self::new()
    }
}
