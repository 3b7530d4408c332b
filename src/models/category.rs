//! Transaction category catalogue
//!
//! A fixed, read-only list. Categories are referenced from transactions by
//! their string key.

use serde::Serialize;
use std::fmt;

use super::transaction::TransactionType;

/// A category a transaction can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransactionCategory {
    /// Stable key stored on transactions
    pub id: &'static str,

    /// Display name
    pub name: &'static str,

    /// Icon identifier for renderers
    pub icon: &'static str,

    /// Hex color for renderers
    pub color: &'static str,

    /// Whether this category files income or expenses
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const INCOME_COLOR: &str = "#10b981";
const EXPENSE_COLOR: &str = "#dc2626";

macro_rules! category {
    ($id:literal, $name:literal, $icon:literal, Income) => {
        TransactionCategory {
            id: $id,
            name: $name,
            icon: $icon,
            color: INCOME_COLOR,
            kind: TransactionType::Income,
        }
    };
    ($id:literal, $name:literal, $icon:literal, Expense) => {
        TransactionCategory {
            id: $id,
            name: $name,
            icon: $icon,
            color: EXPENSE_COLOR,
            kind: TransactionType::Expense,
        }
    };
}

/// The full catalogue, income categories first
pub const CATEGORIES: &[TransactionCategory] = &[
    category!("salary", "Salary", "briefcase", Income),
    category!("freelance", "Freelance", "laptop", Income),
    category!("investment", "Investments", "chart-line", Income),
    category!("bonus", "Bonus", "gift", Income),
    category!("other_income", "Other Income", "plus-circle", Income),
    category!("groceries", "Groceries", "shopping-cart", Expense),
    category!("transport", "Transport", "car", Expense),
    category!("housing", "Housing", "home", Expense),
    category!("utilities", "Utilities", "bolt", Expense),
    category!("health", "Health", "heartbeat", Expense),
    category!("entertainment", "Entertainment", "film", Expense),
    category!("restaurant", "Restaurant", "utensils", Expense),
    category!("shopping", "Shopping", "shopping-bag", Expense),
    category!("education", "Education", "graduation-cap", Expense),
    category!("insurance", "Insurance", "shield-alt", Expense),
    category!("other_expense", "Other Expenses", "minus-circle", Expense),
];

/// Look up a category by key
pub fn find_category(id: &str) -> Option<&'static TransactionCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// All categories filing the given type
pub fn categories_by_type(kind: TransactionType) -> Vec<&'static TransactionCategory> {
    CATEGORIES.iter().filter(|c| c.kind == kind).collect()
}

/// Display name for a key, falling back to the key itself
pub fn category_name(id: &str) -> &str {
    find_category(id).map(|c| c.name).unwrap_or(id)
}
