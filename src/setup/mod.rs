//! Interactive onboarding
//!
//! Terminal front end for the ten-step onboarding survey.

pub mod wizard;

pub use wizard::{SetupResult, SetupWizard};
