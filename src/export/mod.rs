//! Export module for MoneyUP
//!
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: versioned ledger document with summary metadata

pub mod csv;
pub mod json;

pub use csv::export_transactions_csv;
pub use json::{export_transactions_json, LedgerExport, EXPORT_SCHEMA_VERSION};

use std::fmt;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown export format '{}'. Use 'csv' or 'json'", other)),
        }
    }
}
