//! CSV Export functionality
//!
//! One row per transaction, spreadsheet-compatible.

use serde::Serialize;
use std::io::Write;

use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::{category_name, Transaction};

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    /// Signed: negative for expenses
    #[serde(rename = "Amount")]
    amount: String,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        let signed = txn.signed_amount();
        Self {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.to_string(),
            kind: txn.kind.to_string(),
            category: category_name(&txn.category),
            description: &txn.description,
            amount: format!("{:.2}", signed.as_f64()),
        }
    }
}

/// Export transactions to CSV
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> MoneyUpResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if transactions.is_empty() {
        // serialize() only emits headers alongside the first record
        csv_writer
            .write_record(["ID", "Date", "Type", "Category", "Description", "Amount"])
            .map_err(|e| MoneyUpError::Export(e.to_string()))?;
    }

    for txn in transactions {
        csv_writer
            .serialize(CsvRow::from(txn))
            .map_err(|e| MoneyUpError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| MoneyUpError::Export(e.to_string()))?;
    Ok(())
}
