//! In-memory Settings Store.

use std::collections::HashMap;

use async_trait::async_trait;
use clinic_core::ledger::StoreError;
use clinic_core::settings::{AccountingSettings, IntegrationSettings, SettingsStore};
use clinic_shared::types::ClinicId;
use tokio::sync::RwLock;

/// Settings records keyed by clinic.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    accounting: RwLock<HashMap<ClinicId, AccountingSettings>>,
    integrations: RwLock<HashMap<ClinicId, IntegrationSettings>>,
}

impl InMemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every record.
    pub async fn reset(&self) {
        self.accounting.write().await.clear();
        self.integrations.write().await.clear();
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn accounting_or_insert(
        &self,
        defaults: AccountingSettings,
    ) -> Result<AccountingSettings, StoreError> {
        Ok(self
            .accounting
            .write()
            .await
            .entry(defaults.clinic_id)
            .or_insert(defaults)
            .clone())
    }

    async fn save_accounting(
        &self,
        settings: AccountingSettings,
    ) -> Result<AccountingSettings, StoreError> {
        self.accounting
            .write()
            .await
            .insert(settings.clinic_id, settings.clone());
        Ok(settings)
    }

    async fn integrations_or_insert(
        &self,
        defaults: IntegrationSettings,
    ) -> Result<IntegrationSettings, StoreError> {
        Ok(self
            .integrations
            .write()
            .await
            .entry(defaults.clinic_id)
            .or_insert(defaults)
            .clone())
    }

    async fn save_integrations(
        &self,
        settings: IntegrationSettings,
    ) -> Result<IntegrationSettings, StoreError> {
        self.integrations
            .write()
            .await
            .insert(settings.clinic_id, settings.clone());
        Ok(settings)
    }
}
