//! Transaction CLI commands
//!
//! Implements CLI commands for ledger management.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use super::{parse_amount, parse_date_arg, parse_range, today};
use crate::app::MoneyUp;
use crate::display::transaction::{
    format_ledger_summary, format_transaction_details, format_transaction_table,
};
use crate::error::{MoneyUpError, MoneyUpResult};
use crate::export::{export_transactions_csv, export_transactions_json, ExportFormat};
use crate::models::{
    find_category, DateRange, NewTransaction, Transaction, TransactionPatch, TransactionType,
};
use crate::services::{Ledger, TransactionFilter};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount (e.g., "45.80" or "45,80"); always positive
        amount: String,
        /// Description
        description: String,
        /// Category key (see `moneyup categories`)
        #[arg(short, long)]
        category: String,
        /// income or expense; defaults to the category's type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by category key
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New category key
        #[arg(short, long)]
        category: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show income, expenses and balance
    Summary {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only the current calendar month
        #[arg(long, conflicts_with_all = ["from", "to"])]
        month: bool,
    },
    /// Export transactions
    Export {
        /// csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

fn parse_kind(kind: &str) -> MoneyUpResult<TransactionType> {
    kind.parse().map_err(MoneyUpError::Validation)
}

fn find_transaction(ledger: &Ledger<'_>, id: &str) -> MoneyUpResult<Transaction> {
    ledger
        .find(id)?
        .ok_or_else(|| MoneyUpError::transaction_not_found(id))
}

/// Handle a transaction command
pub fn handle_transaction_command(app: &MoneyUp, cmd: TransactionCommands) -> MoneyUpResult<()> {
    let ledger = app.ledger();
    let settings = app.settings();
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            category,
            kind,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let kind = match kind {
                Some(kind) => parse_kind(&kind)?,
                None => {
                    find_category(&category)
                        .ok_or_else(|| MoneyUpError::category_not_found(&category))?
                        .kind
                }
            };
            let date = match date {
                Some(date) => parse_date_arg(&date)?,
                None => today(),
            };

            let txn = ledger.add(NewTransaction::new(amount, description, category, kind, date))?;

            println!("Created transaction:");
            print!("{}", format_transaction_details(&txn, symbol, date_format));
        }

        TransactionCommands::List {
            category,
            kind,
            from,
            to,
            limit,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(category) = category {
                if find_category(&category).is_none() {
                    return Err(MoneyUpError::category_not_found(&category));
                }
                filter = filter.category(category);
            }
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(range) = parse_range(from.as_deref(), to.as_deref())? {
                filter = filter.date_range(range);
            }

            let mut transactions = ledger.query(&filter);
            let total = transactions.len();
            transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
            transactions.truncate(limit);

            print!("{}", format_transaction_table(&transactions, symbol, date_format));
            println!("\nShowing {} of {} transactions", transactions.len(), total);
        }

        TransactionCommands::Show { id } => {
            let txn = find_transaction(&ledger, &id)?;
            print!("{}", format_transaction_details(&txn, symbol, date_format));
        }

        TransactionCommands::Edit {
            id,
            amount,
            description,
            category,
            kind,
            date,
        } => {
            let txn = find_transaction(&ledger, &id)?;

            let mut patch = TransactionPatch::new();
            if let Some(amount) = amount {
                patch = patch.amount(parse_amount(&amount)?);
            }
            if let Some(description) = description {
                patch = patch.description(description);
            }
            if let Some(category) = category {
                patch = patch.category(category);
            }
            if let Some(kind) = kind {
                patch = patch.kind(parse_kind(&kind)?);
            }
            if let Some(date) = date {
                patch = patch.date(parse_date_arg(&date)?);
            }

            if patch.is_empty() {
                println!("Nothing to change. Pass at least one of --amount, --description, --category, --type or --date.");
                return Ok(());
            }

            let updated = ledger.update(txn.id, patch)?;
            println!("Updated transaction:");
            print!("{}", format_transaction_details(&updated, symbol, date_format));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = find_transaction(&ledger, &id)?;

            if !force {
                println!("About to delete transaction:");
                println!("  Date:        {}", txn.date.format(date_format));
                println!("  Amount:      {}", txn.signed_amount().format_signed(symbol));
                println!("  Description: {}", txn.description);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            if ledger.delete(txn.id) {
                println!("Deleted transaction: {} ({} {})", txn.id, txn.date, txn.description);
            } else {
                return Err(MoneyUpError::transaction_not_found(&id));
            }
        }

        TransactionCommands::Summary { from, to, month } => {
            let range = if month {
                Some(DateRange::month_of(today()))
            } else {
                parse_range(from.as_deref(), to.as_deref())?
            };
            let label = range.map_or_else(|| "all time".to_string(), |r| r.to_string());

            print!(
                "{}",
                format_ledger_summary(
                    &label,
                    ledger.total_income(range),
                    ledger.total_expenses(range),
                    &ledger.spending_by_category(range),
                    symbol,
                )
            );
        }

        TransactionCommands::Export {
            format,
            output,
            from,
            to,
        } => {
            let format: ExportFormat = format.parse().map_err(MoneyUpError::Validation)?;

            let mut filter = TransactionFilter::new();
            if let Some(range) = parse_range(from.as_deref(), to.as_deref())? {
                filter = filter.date_range(range);
            }
            let transactions = ledger.query(&filter);

            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
                    MoneyUpError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?)),
                None => Box::new(io::stdout().lock()),
            };

            match format {
                ExportFormat::Csv => export_transactions_csv(&transactions, &mut writer)?,
                ExportFormat::Json => export_transactions_json(&transactions, &mut writer)?,
            }
            writer
                .flush()
                .map_err(|e| MoneyUpError::Export(e.to_string()))?;

            if let Some(path) = output {
                eprintln!(
                    "Exported {} transactions to {}",
                    transactions.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
