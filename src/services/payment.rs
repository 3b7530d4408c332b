//! One-time premium payment gate
//!
//! Two states, unpaid and paid. Payment goes through a [`PaymentProvider`];
//! the only provider is a mock that waits and then always succeeds.

use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::{Money, PaymentId};
use crate::storage::{load_json, read_flag, save_json, write_flag, KeyValueStore, StorageKey};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> MoneyUpResult<&'static Regex> {
    if let Some(regex) = EMAIL_REGEX.get() {
        return Ok(regex);
    }
    let regex = Regex::new(EMAIL_PATTERN)
        .map_err(|e| MoneyUpError::Payment(format!("Invalid e-mail pattern: {}", e)))?;
    Ok(EMAIL_REGEX.get_or_init(|| regex))
}

/// A charge to be processed
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: Money,
    /// ISO 4217 code
    pub currency: String,
    pub name: String,
    pub email: String,
    pub description: String,
}

impl PaymentRequest {
    /// The premium unlock at the configured price
    pub fn premium(settings: &Settings, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            amount: Money::from_cents(settings.premium_price_cents),
            currency: settings.currency_code.clone(),
            name: name.into(),
            email: email.into(),
            description: "MoneyUP Premium".to_string(),
        }
    }

    pub fn validate(&self) -> MoneyUpResult<()> {
        if !self.amount.is_positive() {
            return Err(MoneyUpError::Validation(format!(
                "Payment amount must be greater than zero (got {})",
                self.amount
            )));
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MoneyUpError::Validation(format!(
                "Invalid currency code '{}'",
                self.currency
            )));
        }

        if self.name.trim().chars().count() < 2 {
            return Err(MoneyUpError::Validation(
                "Name must be at least two characters".into(),
            ));
        }

        if !email_regex()?.is_match(self.email.trim()) {
            return Err(MoneyUpError::Validation(format!(
                "Invalid e-mail address '{}'",
                self.email
            )));
        }

        Ok(())
    }
}

/// Proof of a completed payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub amount: Money,
    pub currency: String,
    pub email: String,
    pub paid_at: DateTime<Utc>,
}

/// Something that can take a payment
pub trait PaymentProvider {
    fn name(&self) -> &str;

    /// Charge the request, returning a receipt on success
    fn process(&self, request: &PaymentRequest) -> MoneyUpResult<PaymentReceipt>;
}

/// Simulated provider: waits for a fixed delay, then succeeds
#[derive(Debug, Clone)]
pub struct MockPaymentProvider {
    delay: Duration,
}

impl MockPaymentProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Duration::from_millis(settings.payment_delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl PaymentProvider for MockPaymentProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn process(&self, request: &PaymentRequest) -> MoneyUpResult<PaymentReceipt> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        Ok(PaymentReceipt {
            payment_id: PaymentId::new(),
            amount: request.amount,
            currency: request.currency.clone(),
            email: request.email.trim().to_string(),
            paid_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Unpaid,
    Paid,
}

/// Result of [`PaymentGate::pay`]
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Paid(PaymentReceipt),
    /// Premium was already unlocked; carries the stored receipt if any
    AlreadyPaid(Option<PaymentReceipt>),
}

/// The unpaid/paid gate in front of the dashboard
pub struct PaymentGate<'a> {
    store: &'a dyn KeyValueStore,
    provider: &'a dyn PaymentProvider,
}

impl<'a> PaymentGate<'a> {
    pub fn new(store: &'a dyn KeyValueStore, provider: &'a dyn PaymentProvider) -> Self {
        Self { store, provider }
    }

    pub fn state(&self) -> PaymentState {
        if read_flag(self.store, StorageKey::PremiumUser) {
            PaymentState::Paid
        } else {
            PaymentState::Unpaid
        }
    }

    /// The stored receipt, if a payment went through
    pub fn receipt(&self) -> Option<PaymentReceipt> {
        match load_json(self.store, StorageKey::PaymentSuccess) {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable payment receipt");
                None
            }
        }
    }

    /// Take the one-time payment and unlock premium
    ///
    /// Requires completed onboarding. Paying when already paid does not
    /// charge again. The receipt is written before the premium flag and
    /// removed again if the flag cannot be set.
    pub fn pay(&self, request: &PaymentRequest) -> MoneyUpResult<PaymentOutcome> {
        if self.state() == PaymentState::Paid {
            return Ok(PaymentOutcome::AlreadyPaid(self.receipt()));
        }

        if !read_flag(self.store, StorageKey::OnboardingCompleted) {
            return Err(MoneyUpError::Payment(
                "Onboarding must be completed before paying".into(),
            ));
        }

        request.validate()?;

        let receipt = self.provider.process(request)?;
        save_json(self.store, StorageKey::PaymentSuccess, &receipt)?;
        if let Err(e) = write_flag(self.store, StorageKey::PremiumUser, true) {
            if let Err(rollback) = self.store.remove(StorageKey::PaymentSuccess.as_str()) {
                warn!(error = %rollback, "could not remove receipt of unfinished payment");
            }
            return Err(e);
        }

        info!(
            provider = self.provider.name(),
            payment_id = %receipt.payment_id,
            amount = %receipt.amount,
            "premium unlocked"
        );
        Ok(PaymentOutcome::Paid(receipt))
    }
}
