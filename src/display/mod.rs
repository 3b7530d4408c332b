//! Display formatting for terminal output
//!
//! Turns ledger records, the category catalogue and dashboard summaries into
//! printable strings.

pub mod category;
pub mod dashboard;
pub mod transaction;

pub use category::format_category_table;
pub use dashboard::{format_dashboard, format_status};
pub use transaction::{format_ledger_summary, format_transaction_details, format_transaction_table};
