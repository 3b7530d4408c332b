//! Storage key names
//!
//! Each blob is keyed independently; there is no shared schema version
//! across keys.

use std::fmt;

/// Every key MoneyUP reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The transaction ledger (array of transactions)
    Transactions,
    /// The completed onboarding profile
    UserProfile,
    /// In-flight onboarding wizard state
    OnboardingProgress,
    /// `true` once the onboarding survey has been completed
    OnboardingCompleted,
    /// `true` once the one-time payment has gone through
    PremiumUser,
    /// Receipt of the mock payment
    PaymentSuccess,
    AccessibilitySettings,
    GamificationProgress,
    BankConnection,
}

impl StorageKey {
    /// The key string used by the backing store
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transactions => "moneyup-transactions",
            Self::UserProfile => "moneyup-user-profile",
            Self::OnboardingProgress => "moneyup-onboarding-progress",
            Self::OnboardingCompleted => "moneyup-onboarding-completed",
            Self::PremiumUser => "moneyup-premium-user",
            Self::PaymentSuccess => "moneyup-payment-success",
            Self::AccessibilitySettings => "moneyup-accessibility",
            Self::GamificationProgress => "moneyup-gamification",
            Self::BankConnection => "moneyup-bank-connection",
        }
    }

    /// All keys, in the order they are cleared on reset
    pub fn all() -> &'static [StorageKey] {
        &[
            Self::Transactions,
            Self::UserProfile,
            Self::OnboardingProgress,
            Self::OnboardingCompleted,
            Self::PremiumUser,
            Self::PaymentSuccess,
            Self::AccessibilitySettings,
            Self::GamificationProgress,
            Self::BankConnection,
        ]
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
