//! Category CLI command
//!
//! Lists the built-in category catalogue.

use crate::display::category::format_category_table;
use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::{categories_by_type, TransactionType, CATEGORIES};

/// Print the catalogue, optionally restricted to one type
pub fn handle_categories_command(kind: Option<String>) -> MoneyUpResult<()> {
    let categories = match kind {
        Some(kind) => {
            let kind: TransactionType = kind.parse().map_err(MoneyUpError::Validation)?;
            categories_by_type(kind)
        }
        None => CATEGORIES.iter().collect(),
    };

    print!("{}", format_category_table(&categories));
    Ok(())
}
