//! Transaction model
//!
//! Amounts are always stored positive; whether a record adds to or subtracts
//! from the balance is decided by its [`TransactionType`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::find_category;
use super::ids::TransactionId;
use super::money::Money;

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}'. Use 'income' or 'expense'",
                other
            )),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    /// Always positive
    pub amount: Money,

    pub description: String,

    /// Key into the category catalogue
    pub category: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a record from validated input, stamping id and timestamps
    pub fn from_input(input: NewTransaction, now: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::new(),
            amount: input.amount,
            description: input.description,
            category: input.category,
            kind: input.kind,
            date: input.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount with the sign implied by the type
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Apply a partial update, leaving `updated_at` to the caller
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }

    /// Check the stored invariants
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.description, &self.category, self.kind)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Input for adding a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub kind: TransactionType,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        category: impl Into<String>,
        kind: TransactionType,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category: category.into(),
            kind,
            date,
        }
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.description, &self.category, self.kind)
    }
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_fields(
    amount: Money,
    description: &str,
    category: &str,
    kind: TransactionType,
) -> Result<(), TransactionValidationError> {
    if !amount.is_positive() {
        return Err(TransactionValidationError::NonPositiveAmount(amount));
    }

    if !amount.is_within_limit() {
        return Err(TransactionValidationError::AmountTooLarge(amount));
    }

    if description.trim().is_empty() {
        return Err(TransactionValidationError::EmptyDescription);
    }

    let entry = find_category(category)
        .ok_or_else(|| TransactionValidationError::UnknownCategory(category.to_string()))?;

    if entry.kind != kind {
        return Err(TransactionValidationError::CategoryTypeMismatch {
            category: category.to_string(),
            expected: entry.kind,
            actual: kind,
        });
    }

    Ok(())
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyDescription,
    UnknownCategory(String),
    CategoryTypeMismatch {
        category: String,
        expected: TransactionType,
        actual: TransactionType,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, Money::MAX)
            }
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::UnknownCategory(category) => write!(f, "Unknown category '{}'", category),
            Self::CategoryTypeMismatch {
                category,
                expected,
                actual,
            } => write!(
                f,
                "Category '{}' is for {} but the transaction is {}",
                category, expected, actual
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
