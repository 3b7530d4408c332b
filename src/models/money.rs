//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. On disk amounts are plain decimal numbers (`45.8`), matching the
//! layout of the persisted ledger.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use moneyup::models::Money;
    /// let amount = Money::from_cents(4580); // €45.80
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Largest amount a single record may hold, €1,000,000,000.00
    ///
    /// Keeps every stored amount exactly representable as a JSON number.
    pub const MAX: Money = Money(100_000_000_000);

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole euros portion (truncated toward zero)
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Whether the magnitude fits within [`Money::MAX`]
    pub const fn is_within_limit(&self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0 as u64
    }

    /// Amount as a floating point number of euros
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Convert a decimal number of euros, rounding to the nearest cent
    pub fn from_f64(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Monthly equivalent of an annual amount
    ///
    /// Divides by twelve and rounds half away from zero to the cent, so an
    /// annual €25.00 becomes €2.08.
    pub const fn monthly_from_annual(&self) -> Self {
        let quotient = self.0 / 12;
        let remainder = self.0 % 12;
        if remainder.abs() * 2 >= 12 {
            Self(quotient + self.0.signum())
        } else {
            Self(quotient)
        }
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "45.80", "45,80", "1.052,08", "1.052.000", "€45.80", "45.80 €",
    /// "-10" and plain integers (interpreted as whole euros). At most two
    /// fraction digits are allowed. A single dot followed by exactly three
    /// digits ("1.052") could be either separator and is rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s;
        let invalid = || MoneyParseError::InvalidFormat(input.to_string());

        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let s = s
            .trim_start_matches(['€', '$'])
            .trim_end_matches(['€', '$'])
            .trim();

        let (whole, fraction) = match s.split_once(',') {
            // Comma as decimal separator means dots are thousands separators
            Some((whole, fraction)) => (ungroup(whole).ok_or_else(invalid)?, fraction),
            None => match s.split_once('.') {
                Some((whole, fraction)) if !fraction.contains('.') => {
                    if fraction.len() == 3 && !whole.is_empty() {
                        return Err(MoneyParseError::AmbiguousSeparator(input.to_string()));
                    }
                    (whole.to_string(), fraction)
                }
                Some(_) => (ungroup(s).ok_or_else(invalid)?, ""),
                None => (s.to_string(), ""),
            },
        };

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !is_digits(whole.as_str()) || !is_digits(fraction) {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooManyDecimals(input.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.euros().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.euros(), self.cents_part())
        }
    }

    /// Format with an explicit sign, for income (+) and expense (-) rows
    pub fn format_signed(&self, symbol: &str) -> String {
        if self.is_negative() {
            self.format_with_symbol(symbol)
        } else {
            format!("+{}", self.format_with_symbol(symbol))
        }
    }
}

/// Strip dot thousands separators; every group after the first must have
/// three digits
fn ungroup(s: &str) -> Option<String> {
    let mut groups = s.split('.');
    let first = groups.next()?;
    let mut digits = first.to_string();
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
        grouped = true;
    }
    if grouped && (first.is_empty() || first.len() > 3) {
        return None;
    }
    Some(digits)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("€"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Self::from_f64(value))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooManyDecimals(String),
    AmbiguousSeparator(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooManyDecimals(s) => {
                write!(f, "Invalid money format: {} (at most two decimal places)", s)
            }
            MoneyParseError::AmbiguousSeparator(s) => write!(
                f,
                "Ambiguous amount: {} (write 1052 or 1.052,00 for thousands, 1.05 for cents)",
                s
            ),
        }
    }
}

impl std::error::Error for MoneyParseError {}
