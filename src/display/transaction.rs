//! Transaction display formatting
//!
//! Tables and detail views of ledger records for terminal output.

use std::collections::BTreeMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{category_name, Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, symbol: &str, date_format: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format(date_format).to_string(),
            description: truncate(&txn.description, 32),
            category: category_name(&txn.category).to_string(),
            amount: txn.signed_amount().format_signed(symbol),
        }
    }
}

/// Format transactions as a table, amounts signed by type
pub fn format_transaction_table(
    transactions: &[Transaction],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<_> = transactions
        .iter()
        .map(|t| TransactionRow::new(t, symbol, date_format))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.signed_amount().format_signed(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", category_name(&txn.category)));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    output.push_str(&format!(
        "Updated:     {}\n",
        txn.updated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output
}

/// Format income/expense totals and a per-category expense breakdown
pub fn format_ledger_summary(
    label: &str,
    income: Money,
    expenses: Money,
    spending: &BTreeMap<String, Money>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Summary: {}\n\n", label));
    output.push_str(&format!("  Income:   {:>14}\n", income.format_with_symbol(symbol)));
    output.push_str(&format!("  Expenses: {:>14}\n", expenses.format_with_symbol(symbol)));
    output.push_str(&format!("  {}\n", "-".repeat(24)));
    output.push_str(&format!(
        "  Balance:  {:>14}\n",
        (income - expenses).format_with_symbol(symbol)
    ));

    if !spending.is_empty() {
        output.push_str("\nExpenses by category:\n");

        let mut by_amount: Vec<_> = spending.iter().collect();
        by_amount.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (category, amount) in by_amount {
            let share = if expenses.is_zero() {
                0.0
            } else {
                amount.cents() as f64 / expenses.cents() as f64 * 100.0
            };
            output.push_str(&format!(
                "  {:<16} {:>12} {:>5.1}%\n",
                category_name(category),
                amount.format_with_symbol(symbol),
                share
            ));
        }
    }

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
