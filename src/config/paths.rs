//! Path management for MoneyUP
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYUP_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/moneyup` on Linux,
//!    `~/Library/Application Support/moneyup` on macOS, `%APPDATA%\moneyup`
//!    on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::MoneyUpError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "MONEYUP_DATA_DIR";

/// Manages all paths used by MoneyUP
#[derive(Debug, Clone)]
pub struct MoneyUpPaths {
    base_dir: PathBuf,
}

impl MoneyUpPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, MoneyUpError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            let dirs = BaseDirs::new().ok_or_else(|| {
                MoneyUpError::Config("Could not determine the home directory".into())
            })?;
            dirs.config_dir().join("moneyup")
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per storage key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), MoneyUpError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MoneyUpError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MoneyUpError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
