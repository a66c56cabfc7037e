//! Per-clinic accounting and integration settings.
//!
//! Settings are created with defaults on first read; updates are partial.

pub mod service;
pub mod store;
pub mod types;

pub use service::SettingsService;
pub use store::SettingsStore;
pub use types::{
    AccountingSettings, AccountingSettingsPatch, IntegrationSettings, IntegrationSettingsPatch,
};
