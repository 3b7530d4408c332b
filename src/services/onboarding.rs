//! Onboarding survey state machine
//!
//! Ten linear steps with next/back transitions. Nothing gates progression;
//! a user may walk through with every field left at zero. Leaving the last
//! step persists the profile and marks onboarding as completed.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::{FieldSpec, OnboardingProfile, PROFILE_FIELDS};
use crate::storage::{load_json, load_or_default, save_json, write_flag, KeyValueStore, StorageKey};

/// Number of survey steps
pub const TOTAL_STEPS: u8 = 10;

/// One page of the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OnboardingStep {
    Welcome,
    PersonalInfo,
    Income,
    Housing,
    Transport,
    Insurance,
    Digital,
    Health,
    LeisureEducation,
    Goals,
}

impl OnboardingStep {
    const ALL: [OnboardingStep; TOTAL_STEPS as usize] = [
        Self::Welcome,
        Self::PersonalInfo,
        Self::Income,
        Self::Housing,
        Self::Transport,
        Self::Insurance,
        Self::Digital,
        Self::Health,
        Self::LeisureEducation,
        Self::Goals,
    ];

    /// All steps in order
    pub fn all() -> &'static [OnboardingStep] {
        &Self::ALL
    }

    /// 1-based position of this step
    pub fn number(&self) -> u8 {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(1)
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=TOTAL_STEPS => Some(Self::ALL[number as usize - 1]),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to MoneyUP",
            Self::PersonalInfo => "About you",
            Self::Income => "Income",
            Self::Housing => "Housing",
            Self::Transport => "Transport",
            Self::Insurance => "Insurance & pensions",
            Self::Digital => "Digital & subscriptions",
            Self::Health => "Health & wellness",
            Self::LeisureEducation => "Leisure & education",
            Self::Goals => "Your goals",
        }
    }

    /// Whether `key` is collected on this step
    fn owns(&self, key: &str) -> bool {
        let (section, _) = key.split_once('.').unwrap_or((key, ""));
        match self {
            Self::Welcome => key == "personalInfo.name",
            Self::PersonalInfo => section == "personalInfo" && key != "personalInfo.name",
            Self::Income => section == "income",
            Self::Housing => section == "housing",
            Self::Transport => section == "transport",
            Self::Insurance => section == "insurance",
            Self::Digital => section == "digital",
            Self::Health => section == "health",
            Self::LeisureEducation => section == "education",
            Self::Goals => section == "goals",
        }
    }

    /// The profile fields collected on this step, in survey order
    pub fn fields(&self) -> Vec<&'static FieldSpec> {
        PROFILE_FIELDS.iter().filter(|f| self.owns(f.key)).collect()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}/{}: {}", self.number(), TOTAL_STEPS, self.title())
    }
}

/// Outcome of advancing the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(OnboardingStep),
    /// The profile was persisted and onboarding is complete
    Completed,
}

/// Stored shape of an in-flight survey
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OnboardingProgress {
    step: u8,
    data: OnboardingProfile,
}

/// The survey in progress
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingWizard {
    step: OnboardingStep,
    profile: OnboardingProfile,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    /// A fresh survey at step 1 with an all-default profile
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Welcome,
            profile: OnboardingProfile::default(),
        }
    }

    /// Restore saved progress, or start fresh if there is none or it is
    /// unreadable
    pub fn resume(store: &dyn KeyValueStore) -> Self {
        let progress = match load_json::<OnboardingProgress>(store, StorageKey::OnboardingProgress) {
            Ok(progress) => progress,
            Err(e) => {
                warn!(error = %e, "discarding unreadable onboarding progress");
                None
            }
        };

        let Some(progress) = progress else {
            return Self::new();
        };

        match OnboardingStep::from_number(progress.step) {
            Some(step) => Self {
                step,
                profile: progress.data,
            },
            None => {
                warn!(step = progress.step, "discarding onboarding progress with invalid step");
                Self::new()
            }
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn profile(&self) -> &OnboardingProfile {
        &self.profile
    }

    /// Set a profile field from raw input
    pub fn set_field(&mut self, key: &str, value: &str) -> MoneyUpResult<()> {
        self.profile
            .set_field(key, value)
            .map_err(|e| MoneyUpError::Validation(e.to_string()))
    }

    /// Move forward one step, completing the survey from the last step
    pub fn next(&mut self, store: &dyn KeyValueStore) -> MoneyUpResult<Advance> {
        match self.step.next() {
            Some(step) => {
                self.step = step;
                if let Err(e) = self.save_progress(store) {
                    warn!(error = %e, "failed to save onboarding progress");
                }
                Ok(Advance::Moved(step))
            }
            None => {
                self.complete(store)?;
                Ok(Advance::Completed)
            }
        }
    }

    /// Move back one step; returns false on the first step
    pub fn back(&mut self, store: &dyn KeyValueStore) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                if let Err(e) = self.save_progress(store) {
                    warn!(error = %e, "failed to save onboarding progress");
                }
                true
            }
            None => false,
        }
    }

    /// Persist the current step and answers so the survey can be resumed
    pub fn save_progress(&self, store: &dyn KeyValueStore) -> MoneyUpResult<()> {
        let progress = OnboardingProgress {
            step: self.step.number(),
            data: self.profile.clone(),
        };
        save_json(store, StorageKey::OnboardingProgress, &progress)
    }

    fn complete(&self, store: &dyn KeyValueStore) -> MoneyUpResult<()> {
        save_json(store, StorageKey::UserProfile, &self.profile)?;
        write_flag(store, StorageKey::OnboardingCompleted, true)?;

        if let Err(e) = store.remove(StorageKey::OnboardingProgress.as_str()) {
            warn!(error = %e, "failed to clear onboarding progress");
        }

        info!(
            fixed_costs = %self.profile.fixed_costs(),
            income = %self.profile.monthly_income(),
            "onboarding completed"
        );
        Ok(())
    }
}

/// The profile saved on completion; all defaults if there is none
pub fn load_profile(store: &dyn KeyValueStore) -> OnboardingProfile {
    load_or_default(store, StorageKey::UserProfile)
}
