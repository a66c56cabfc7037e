//! Settings reads with first-read defaults, and partial updates.

use std::sync::Arc;

use chrono::Utc;
use clinic_shared::config::SettingsDefaults;
use clinic_shared::types::ClinicId;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::store::SettingsStore;
use super::types::{
    AccountingSettings, AccountingSettingsPatch, IntegrationSettings, IntegrationSettingsPatch,
};
use crate::error::BillingResult;
use crate::ledger::PaymentMethod;

/// Reads and updates clinic settings.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    defaults: Arc<AccountingDefaults>,
    updates: Arc<Mutex<()>>,
}

#[derive(Debug)]
struct AccountingDefaults {
    currency: String,
    default_payment_method: PaymentMethod,
    receipt_footer: String,
}

impl SettingsService {
    /// Creates the service. An unparsable default payment method falls back to cash.
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>, defaults: &SettingsDefaults) -> Self {
        let default_payment_method = defaults
            .default_payment_method
            .parse::<PaymentMethod>()
            .unwrap_or_else(|e| {
                warn!(
                    value = %defaults.default_payment_method,
                    error = %e,
                    "Unknown default payment method in config, using cash"
                );
                PaymentMethod::Cash
            });

        Self {
            store,
            defaults: Arc::new(AccountingDefaults {
                currency: defaults.currency.clone(),
                default_payment_method,
                receipt_footer: defaults.receipt_footer.clone(),
            }),
            updates: Arc::new(Mutex::new(())),
        }
    }

    /// Accounting settings of a clinic; the first read stores the defaults.
    pub async fn accounting_settings(&self, clinic_id: ClinicId) -> BillingResult<AccountingSettings> {
        Ok(self
            .store
            .accounting_or_insert(self.accounting_defaults(clinic_id))
            .await?)
    }

    /// Applies a partial update to the accounting settings.
    pub async fn update_accounting_settings(
        &self,
        clinic_id: ClinicId,
        patch: AccountingSettingsPatch,
    ) -> BillingResult<AccountingSettings> {
        let _update = self.updates.lock().await;

        let mut settings = self.accounting_settings(clinic_id).await?;
        patch.apply(&mut settings);
        settings.updated_at = Utc::now();

        let saved = self.store.save_accounting(settings).await?;
        info!(clinic_id = %clinic_id, currency = %saved.currency, "Accounting settings updated");
        Ok(saved)
    }

    /// Integration settings of a clinic; the first read stores everything disabled.
    pub async fn integration_settings(
        &self,
        clinic_id: ClinicId,
    ) -> BillingResult<IntegrationSettings> {
        Ok(self
            .store
            .integrations_or_insert(IntegrationSettings::disabled(clinic_id))
            .await?)
    }

    /// Applies a partial update to the integration settings.
    pub async fn update_integration_settings(
        &self,
        clinic_id: ClinicId,
        patch: IntegrationSettingsPatch,
    ) -> BillingResult<IntegrationSettings> {
        let _update = self.updates.lock().await;

        let mut settings = self.integration_settings(clinic_id).await?;
        patch.apply(&mut settings);
        settings.updated_at = Utc::now();

        let saved = self.store.save_integrations(settings).await?;
        info!(clinic_id = %clinic_id, "Integration settings updated");
        Ok(saved)
    }

    fn accounting_defaults(&self, clinic_id: ClinicId) -> AccountingSettings {
        AccountingSettings {
            clinic_id,
            currency: self.defaults.currency.clone(),
            default_payment_method: self.defaults.default_payment_method,
            receipt_footer: self.defaults.receipt_footer.clone(),
            updated_at: Utc::now(),
        }
    }
}
