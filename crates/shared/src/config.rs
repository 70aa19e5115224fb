//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Report engine configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Report engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Default display currency (ISO 4217 code).
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Default maximum account level shown in hierarchical reports.
    #[serde(default = "default_max_level")]
    pub default_max_level: u32,
    /// Absolute tolerance for the trial balance `is_balanced` check.
    ///
    /// Rounding slack accumulates from per-account currency conversion,
    /// so a balanced ledger may differ from zero by a few hundredths.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
    /// Absolute tolerance for stored-vs-ledger balance discrepancy checks.
    #[serde(default = "default_discrepancy_tolerance")]
    pub discrepancy_tolerance: Decimal,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_max_level() -> u32 {
    3
}

fn default_balance_tolerance() -> Decimal {
    // 0.05 currency units
    Decimal::new(5, 2)
}

fn default_discrepancy_tolerance() -> Decimal {
    // 0.01 currency units
    Decimal::new(1, 2)
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            default_max_level: default_max_level(),
            balance_tolerance: default_balance_tolerance(),
            discrepancy_tolerance: default_discrepancy_tolerance(),
        }
    }
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
            .add_source(config::Environment::with_prefix("BRANCHBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
