//! Application composition root
//!
//! [`MoneyUp`] owns the store, the settings and the payment provider and
//! hands out the services that borrow them. Front ends build one of these
//! and pass it around; nothing in the library is a global.

use chrono::NaiveDate;

use crate::config::{MoneyUpPaths, Settings};
use crate::error::MoneyUpResult;
use crate::services::{
    current_screen, reset, Dashboard, DashboardSummary, Ledger, MockPaymentProvider,
    OnboardingWizard, PaymentGate, PaymentProvider, Screen,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

pub struct MoneyUp {
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    provider: Box<dyn PaymentProvider>,
}

impl MoneyUp {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        provider: Box<dyn PaymentProvider>,
    ) -> Self {
        Self {
            store,
            settings,
            provider,
        }
    }

    /// File-backed instance using the settings found under `paths`
    pub fn open(paths: &MoneyUpPaths) -> MoneyUpResult<Self> {
        let settings = Settings::load_or_create(paths)?;
        let store = FileStore::open(paths)?;
        let provider = MockPaymentProvider::from_settings(&settings);
        Ok(Self::new(Box::new(store), settings, Box::new(provider)))
    }

    /// Throwaway instance backed by memory
    pub fn in_memory(settings: Settings) -> Self {
        let provider = MockPaymentProvider::from_settings(&settings);
        Self::new(Box::new(MemoryStore::new()), settings, Box::new(provider))
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ledger(&self) -> Ledger<'_> {
        Ledger::new(self.store())
    }

    /// The onboarding wizard, resumed from saved progress if any
    pub fn onboarding(&self) -> OnboardingWizard {
        OnboardingWizard::resume(self.store())
    }

    pub fn payment_gate(&self) -> PaymentGate<'_> {
        PaymentGate::new(self.store(), self.provider.as_ref())
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(self.store(), self.settings.seed_sample_data)
    }

    pub fn screen(&self) -> Screen {
        current_screen(self.store())
    }

    /// Dashboard summary, only once the gate allows the dashboard
    ///
    /// Returns the pending screen otherwise.
    pub fn dashboard_summary(&self, today: NaiveDate) -> MoneyUpResult<Result<DashboardSummary, Screen>> {
        match self.screen() {
            Screen::Dashboard => self.dashboard().load(today).map(Ok),
            pending => Ok(Err(pending)),
        }
    }

    pub fn reset(&self) -> MoneyUpResult<usize> {
        reset(self.store())
    }
}
