//! Service layer for MoneyUP
//!
//! Business logic on top of the key-value store: the ledger, the onboarding
//! survey, the dashboard aggregation and the payment gate.

pub mod dashboard;
pub mod ledger;
pub mod onboarding;
pub mod payment;
pub mod session;

pub use dashboard::{compute_metrics, savings_rate, Dashboard, DashboardMetrics, DashboardSummary, MetricSource};
pub use ledger::{Ledger, TransactionFilter};
pub use onboarding::{load_profile, Advance, OnboardingStep, OnboardingWizard, TOTAL_STEPS};
pub use payment::{
    MockPaymentProvider, PaymentGate, PaymentOutcome, PaymentProvider, PaymentReceipt,
    PaymentRequest, PaymentState,
};
pub use session::{current_screen, reset, Screen};
