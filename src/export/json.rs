//! JSON Export functionality
//!
//! Exports the ledger to a versioned JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::{Money, Transaction, TransactionType};
use crate::services::ledger::sum_amounts;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl LedgerExport {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let total_income = sum_amounts(&transactions, TransactionType::Income, None);
        let total_expenses = sum_amounts(&transactions, TransactionType::Expense, None);

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            metadata,
        }
    }
}

/// Export transactions as pretty-printed JSON
pub fn export_transactions_json<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> MoneyUpResult<()> {
    let export = LedgerExport::new(transactions.to_vec());

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| MoneyUpError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| MoneyUpError::Export(e.to_string()))?;
    Ok(())
}
