//! Screen routing and reset
//!
//! Which top-level screen to show is decided purely by the onboarding and
//! premium flags.

use std::fmt;
use tracing::{info, warn};

use crate::error::MoneyUpResult;
use crate::storage::{read_flag, KeyValueStore, StorageKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Payment,
    Dashboard,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Onboarding => write!(f, "onboarding"),
            Self::Payment => write!(f, "payment"),
            Self::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// Resolve the screen from the stored flags
pub fn current_screen(store: &dyn KeyValueStore) -> Screen {
    if !read_flag(store, StorageKey::OnboardingCompleted) {
        Screen::Onboarding
    } else if !read_flag(store, StorageKey::PremiumUser) {
        Screen::Payment
    } else {
        Screen::Dashboard
    }
}

/// Remove every MoneyUP key, returning how many held a value
///
/// A key that cannot be removed is logged and skipped; the first such
/// failure is returned after all keys have been attempted.
pub fn reset(store: &dyn KeyValueStore) -> MoneyUpResult<usize> {
    let mut removed = 0;
    let mut first_error = None;

    for key in StorageKey::all() {
        match store.remove(key.as_str()) {
            Ok(true) => removed += 1,
            Ok(false) => {}
            Err(e) => {
                warn!(key = %key, error = %e, "failed to remove key");
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    info!(removed, "reset all data");
    Ok(removed)
}
