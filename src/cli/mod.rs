//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod payment;
pub mod session;
pub mod transaction;

pub use category::handle_categories_command;
pub use payment::handle_pay_command;
pub use session::{handle_dashboard_command, handle_reset_command, handle_status_command};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::{parse_date, DateRange, Money};

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn parse_amount(s: &str) -> MoneyUpResult<Money> {
    Money::parse(s).map_err(|e| {
        MoneyUpError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '45.80'. Error: {}",
            s, e
        ))
    })
}

pub(crate) fn parse_date_arg(s: &str) -> MoneyUpResult<NaiveDate> {
    parse_date(s).map_err(|_| {
        MoneyUpError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Build a range from optional bounds; a missing bound is open-ended
pub(crate) fn parse_range(from: Option<&str>, to: Option<&str>) -> MoneyUpResult<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }

    let start = from.map(parse_date_arg).transpose()?.unwrap_or(NaiveDate::MIN);
    let end = to.map(parse_date_arg).transpose()?.unwrap_or(NaiveDate::MAX);
    Ok(Some(DateRange::new(start, end)))
}
