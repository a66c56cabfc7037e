//! Settings records and patches.

use chrono::{DateTime, Utc};
use clinic_shared::types::ClinicId;
use serde::{Deserialize, Serialize};

use crate::ledger::PaymentMethod;

/// Accounting preferences of a clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingSettings {
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// ISO currency code used for display.
    pub currency: String,
    /// Method preselected when recording payments.
    pub default_payment_method: PaymentMethod,
    /// Text printed at the bottom of receipts.
    pub receipt_footer: String,
    /// Last change.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of `AccountingSettings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingSettingsPatch {
    /// New currency.
    pub currency: Option<String>,
    /// New default method.
    pub default_payment_method: Option<PaymentMethod>,
    /// New receipt footer.
    pub receipt_footer: Option<String>,
}

impl AccountingSettingsPatch {
    /// Applies the set fields.
    pub fn apply(self, settings: &mut AccountingSettings) {
        if let Some(currency) = self.currency {
            settings.currency = currency.trim().to_uppercase();
        }
        if let Some(method) = self.default_payment_method {
            settings.default_payment_method = method;
        }
        if let Some(footer) = self.receipt_footer {
            settings.receipt_footer = footer;
        }
    }
}

/// Feature toggles for third-party integrations of a clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    /// Owning clinic.
    pub clinic_id: ClinicId,
    /// Appointment reminders by SMS.
    pub sms_reminders_enabled: bool,
    /// Receipts sent by email.
    pub email_receipts_enabled: bool,
    /// Online card payments.
    pub online_payments_enabled: bool,
    /// Last change.
    pub updated_at: DateTime<Utc>,
}

impl IntegrationSettings {
    /// Everything disabled.
    #[must_use]
    pub fn disabled(clinic_id: ClinicId) -> Self {
        Self {
            clinic_id,
            sms_reminders_enabled: false,
            email_receipts_enabled: false,
            online_payments_enabled: false,
            updated_at: Utc::now(),
        }
    }
}

/// Partial update of `IntegrationSettings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSettingsPatch {
    /// Toggle SMS reminders.
    pub sms_reminders_enabled: Option<bool>,
    /// Toggle email receipts.
    pub email_receipts_enabled: Option<bool>,
    /// Toggle online payments.
    pub online_payments_enabled: Option<bool>,
}

impl IntegrationSettingsPatch {
    /// Applies the set fields.
    pub fn apply(self, settings: &mut IntegrationSettings) {
        if let Some(v) = self.sms_reminders_enabled {
            settings.sms_reminders_enabled = v;
        }
        if let Some(v) = self.email_receipts_enabled {
            settings.email_receipts_enabled = v;
        }
        if let Some(v) = self.online_payments_enabled {
            settings.online_payments_enabled = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounting() -> AccountingSettings {
        AccountingSettings {
            clinic_id: ClinicId::new(),
            currency: "USD".to_string(),
            default_payment_method: PaymentMethod::Cash,
            receipt_footer: "Thank you".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut settings = accounting();
        let before = settings.clone();

        AccountingSettingsPatch::default().apply(&mut settings);

        assert_eq!(settings, before);
    }

    #[test]
    fn test_patch_sets_only_given_fields() {
        let mut settings = accounting();

        AccountingSettingsPatch {
            currency: Some(" eur ".to_string()),
            default_payment_method: None,
            receipt_footer: None,
        }
        .apply(&mut settings);

        assert_eq!(settings.currency, "EUR");
        assert_eq!(settings.default_payment_method, PaymentMethod::Cash);
        assert_eq!(settings.receipt_footer, "Thank you");
    }

    #[test]
    fn test_integration_patch() {
        let mut settings = IntegrationSettings::disabled(ClinicId::new());

        IntegrationSettingsPatch {
            sms_reminders_enabled: Some(true),
            ..IntegrationSettingsPatch::default()
        }
        .apply(&mut settings);

        assert!(settings.sms_reminders_enabled);
        assert!(!settings.email_receipts_enabled);
        assert!(!settings.online_payments_enabled);
    }
}
