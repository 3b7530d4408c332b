//! Configuration module for MoneyUP
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MoneyUpPaths;
pub use settings::Settings;
