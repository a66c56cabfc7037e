//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Billing engine tunables.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Defaults for per-clinic settings created on first read.
    #[serde(default)]
    pub settings: SettingsDefaults,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Billing engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Upper bound on rows fetched from each ledger for one cashier day.
    #[serde(default = "default_cashier_row_limit")]
    pub cashier_row_limit: usize,
    /// Name shown when a patient cannot be found in the directory.
    #[serde(default = "default_unknown_patient_name")]
    pub unknown_patient_name: String,
    /// Phone shown when a patient cannot be found in the directory.
    #[serde(default = "default_placeholder_phone")]
    pub placeholder_phone: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            cashier_row_limit: default_cashier_row_limit(),
            unknown_patient_name: default_unknown_patient_name(),
            placeholder_phone: default_placeholder_phone(),
        }
    }
}

fn default_cashier_row_limit() -> usize {
    500
}

fn default_unknown_patient_name() -> String {
    "Unknown patient".to_string()
}

fn default_placeholder_phone() -> String {
    "N/A".to_string()
}

/// Defaults applied the first time a clinic's settings are read.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsDefaults {
    /// ISO 4217 currency code for display.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Payment method preselected at the cashier.
    #[serde(default = "default_payment_method")]
    pub default_payment_method: String,
    /// Footer printed on receipts.
    #[serde(default)]
    pub receipt_footer: String,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_payment_method: default_payment_method(),
            receipt_footer: String::new(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_payment_method() -> String {
    "cash".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "clinic=debug,tower_http=debug".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLINIC").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
