//! Core data models for MoneyUP
//!
//! Transactions and their category catalogue, the onboarding cost profile,
//! and the value types shared between them.

pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod profile;
pub mod transaction;

pub use category::{categories_by_type, category_name, find_category, TransactionCategory, CATEGORIES};
pub use ids::{PaymentId, TransactionId};
pub use money::Money;
pub use period::{parse_date, DateRange};
pub use profile::{FieldKind, FieldSpec, FixedCostBreakdown, Frequency, OnboardingProfile, PROFILE_FIELDS};
pub use transaction::{
    NewTransaction, Transaction, TransactionPatch, TransactionType, TransactionValidationError,
};
