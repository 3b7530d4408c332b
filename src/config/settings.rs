//! User settings for MoneyUP
//!
//! Display preferences, sample-data seeding and the parameters of the
//! simulated payment gate.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::MoneyUpPaths;
use crate::error::MoneyUpError;

/// User settings for MoneyUP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Insert the demo transactions when the ledger is empty
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,

    /// Simulated processing time of the mock payment provider
    #[serde(default = "default_payment_delay_ms")]
    pub payment_delay_ms: u64,

    /// One-time premium price in cents
    #[serde(default = "default_premium_price_cents")]
    pub premium_price_cents: i64,

    /// ISO 4217 code charged for premium
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_true() -> bool {
    true
}

fn default_payment_delay_ms() -> u64 {
    2000
}

fn default_premium_price_cents() -> i64 {
    499
}

fn default_currency_code() -> String {
    "EUR".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            seed_sample_data: default_true(),
            payment_delay_ms: default_payment_delay_ms(),
            premium_price_cents: default_premium_price_cents(),
            currency_code: default_currency_code(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &MoneyUpPaths) -> Result<Self, MoneyUpError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| MoneyUpError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MoneyUpError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Not persisted until the caller asks
            Ok(Settings::default())
        }
    }

    /// Reject settings the display code cannot use
    pub fn validate(&self) -> Result<(), MoneyUpError> {
        // Formatting a bare date fails on unknown specifiers and on time fields
        let mut rendered = String::new();
        write!(rendered, "{}", NaiveDate::MIN.format(&self.date_format)).map_err(|_| {
            MoneyUpError::Config(format!("Invalid date format '{}'", self.date_format))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyUpPaths) -> Result<(), MoneyUpError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| MoneyUpError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MoneyUpError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
