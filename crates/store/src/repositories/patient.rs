//! In-memory Patient Directory.

use std::collections::HashMap;

use async_trait::async_trait;
use clinic_core::ledger::{Patient, PatientDirectory, StoreError};
use clinic_shared::types::PatientId;
use tokio::sync::RwLock;

/// Patients by id.
#[derive(Debug, Default)]
pub struct InMemoryPatientDirectory {
    patients: RwLock<HashMap<PatientId, Patient>>,
}

impl InMemoryPatientDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a patient.
    pub async fn insert(&self, patient: Patient) {
        self.patients.write().await.insert(patient.id, patient);
    }

    /// Removes every patient.
    pub async fn reset(&self) {
        self.patients.write().await.clear();
    }
}

#[async_trait]
impl PatientDirectory for InMemoryPatientDirectory {
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, StoreError> {
        Ok(self.patients.read().await.get(&id).cloned())
    }
}
