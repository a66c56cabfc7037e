//! Settings persistence port.

use async_trait::async_trait;

use super::types::{AccountingSettings, IntegrationSettings};
use crate::ledger::StoreError;

/// Key-value settings storage, one record of each kind per clinic.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the stored accounting settings, storing `defaults` first if none exist.
    async fn accounting_or_insert(
        &self,
        defaults: AccountingSettings,
    ) -> Result<AccountingSettings, StoreError>;

    /// Replaces the accounting settings of `settings.clinic_id`.
    async fn save_accounting(
        &self,
        settings: AccountingSettings,
    ) -> Result<AccountingSettings, StoreError>;

    /// Returns the stored integration settings, storing `defaults` first if none exist.
    async fn integrations_or_insert(
        &self,
        defaults: IntegrationSettings,
    ) -> Result<IntegrationSettings, StoreError>;

    /// Replaces the integration settings of `settings.clinic_id`.
    async fn save_integrations(
        &self,
        settings: IntegrationSettings,
    ) -> Result<IntegrationSettings, StoreError>;
}
