//! Dashboard aggregation
//!
//! Derives income, fixed costs, available budget and savings rate from the
//! onboarding profile and the ledger. Nothing here is persisted.
//!
//! Actual current-month figures win over onboarding estimates, but only
//! when they are non-zero. Income and fixed costs fall back independently.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use super::ledger::{sum_amounts, Ledger};
use super::onboarding::load_profile;
use crate::error::MoneyUpResult;
use crate::models::{
    DateRange, FixedCostBreakdown, Money, OnboardingProfile, Transaction, TransactionType,
};
use crate::storage::KeyValueStore;

/// Number of records shown in the recent list
pub const RECENT_LIMIT: usize = 5;

/// Where a dashboard figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    /// Summed from this month's transactions
    Transactions,
    /// Declared during onboarding
    Profile,
}

impl fmt::Display for MetricSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transactions => write!(f, "this month's transactions"),
            Self::Profile => write!(f, "onboarding estimate"),
        }
    }
}

/// Budget figures for one month
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub period: DateRange,
    pub income: Money,
    pub income_source: MetricSource,
    pub fixed_costs: Money,
    pub fixed_costs_source: MetricSource,
    /// Income minus fixed costs; may be negative
    pub available_budget: Money,
    /// Available budget as a fraction of income, 0 when income is zero
    pub savings_rate: f64,
}

/// Fraction of income left over; zero income yields zero
pub fn savings_rate(available: Money, income: Money) -> f64 {
    if income.is_zero() {
        return 0.0;
    }
    available.cents() as f64 / income.cents() as f64
}

/// Compute the metrics for the calendar month containing `today`
pub fn compute_metrics(
    profile: &OnboardingProfile,
    transactions: &[Transaction],
    today: NaiveDate,
) -> DashboardMetrics {
    let period = DateRange::month_of(today);

    let month_income = sum_amounts(transactions, TransactionType::Income, Some(period));
    let month_expenses = sum_amounts(transactions, TransactionType::Expense, Some(period));

    let (income, income_source) = if month_income.is_zero() {
        (profile.monthly_income(), MetricSource::Profile)
    } else {
        (month_income, MetricSource::Transactions)
    };

    let (fixed_costs, fixed_costs_source) = if month_expenses.is_zero() {
        (profile.fixed_costs(), MetricSource::Profile)
    } else {
        (month_expenses, MetricSource::Transactions)
    };

    let available_budget = income - fixed_costs;

    DashboardMetrics {
        period,
        income,
        income_source,
        fixed_costs,
        fixed_costs_source,
        available_budget,
        savings_rate: savings_rate(available_budget, income),
    }
}

/// Everything the dashboard screen shows
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub user_name: String,
    pub metrics: DashboardMetrics,
    /// Onboarding fixed costs per group
    pub breakdown: FixedCostBreakdown,
    /// Current-month expenses by category
    pub spending: BTreeMap<String, Money>,
    pub recent: Vec<Transaction>,
}

/// Service assembling the dashboard from storage
pub struct Dashboard<'a> {
    store: &'a dyn KeyValueStore,
    seed_sample_data: bool,
}

impl<'a> Dashboard<'a> {
    pub fn new(store: &'a dyn KeyValueStore, seed_sample_data: bool) -> Self {
        Self {
            store,
            seed_sample_data,
        }
    }

    /// Load the profile and ledger and compute the summary
    ///
    /// An empty ledger is seeded with the demo records first when seeding is
    /// enabled.
    pub fn load(&self, today: NaiveDate) -> MoneyUpResult<DashboardSummary> {
        let ledger = Ledger::new(self.store);
        if self.seed_sample_data {
            ledger.seed_sample_data(today)?;
        }

        let profile = load_profile(self.store);
        let transactions = ledger.list();
        let metrics = compute_metrics(&profile, &transactions, today);

        debug!(
            income = %metrics.income,
            fixed_costs = %metrics.fixed_costs,
            savings_rate = metrics.savings_rate,
            "computed dashboard metrics"
        );

        Ok(DashboardSummary {
            user_name: profile.personal_info.name.clone(),
            breakdown: profile.fixed_cost_breakdown(),
            spending: ledger.spending_by_category(Some(metrics.period)),
            recent: ledger.recent(RECENT_LIMIT),
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::storage::{save_json, MemoryStore, StorageKey};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(cents: i64, category: &str, kind: TransactionType, on: NaiveDate) -> Transaction {
        Transaction::from_input(
            NewTransaction::new(Money::from_cents(cents), "Test", category, kind, on),
            Utc::now(),
        )
    }

    fn profile() -> OnboardingProfile {
        let mut profile = OnboardingProfile::default();
        profile.set_field("income.monthlyNetIncome", "3000").unwrap();
        profile.set_field("housing.rent", "800").unwrap();
        profile.set_field("housing.utilities", "250").unwrap();
        profile.set_field("housing.homeInsurance", "25").unwrap();
        profile
    }

    #[test]
    fn test_savings_rate_zero_income() {
        assert_eq!(savings_rate(Money::from_cents(-5000), Money::zero()), 0.0);
        assert_eq!(savings_rate(Money::zero(), Money::zero()), 0.0);
    }

    #[test]
    fn test_savings_rate() {
        let rate = savings_rate(Money::from_cents(50000), Money::from_cents(200000));
        assert!((rate - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_falls_back_to_profile_without_transactions() {
        let today = date(2025, 3, 15);
        let metrics = compute_metrics(&profile(), &[], today);

        assert_eq!(metrics.income, Money::from_cents(300000));
        assert_eq!(metrics.income_source, MetricSource::Profile);
        assert_eq!(metrics.fixed_costs, Money::from_cents(105208));
        assert_eq!(metrics.fixed_costs_source, MetricSource::Profile);
        assert_eq!(metrics.available_budget, Money::from_cents(194792));
    }

    #[test]
    fn test_other_months_do_not_count() {
        let today = date(2025, 3, 15);
        let transactions = vec![
            txn(500000, "salary", TransactionType::Income, date(2025, 2, 28)),
            txn(10000, "groceries", TransactionType::Expense, date(2025, 4, 1)),
        ];

        let metrics = compute_metrics(&profile(), &transactions, today);
        assert_eq!(metrics.income_source, MetricSource::Profile);
        assert_eq!(metrics.fixed_costs_source, MetricSource::Profile);
    }

    #[test]
    fn test_prefers_current_month_transactions() {
        let today = date(2025, 3, 15);
        let transactions = vec![
            txn(280000, "salary", TransactionType::Income, date(2025, 3, 1)),
            txn(4580, "groceries", TransactionType::Expense, date(2025, 3, 15)),
        ];

        let metrics = compute_metrics(&profile(), &transactions, today);
        assert_eq!(metrics.income, Money::from_cents(280000));
        assert_eq!(metrics.income_source, MetricSource::Transactions);
        assert_eq!(metrics.fixed_costs, Money::from_cents(4580));
        assert_eq!(metrics.fixed_costs_source, MetricSource::Transactions);
    }

    #[test]
    fn test_sources_fall_back_independently() {
        let today = date(2025, 3, 15);
        let transactions = vec![txn(4580, "groceries", TransactionType::Expense, today)];

        let metrics = compute_metrics(&profile(), &transactions, today);
        assert_eq!(metrics.income_source, MetricSource::Profile);
        assert_eq!(metrics.fixed_costs_source, MetricSource::Transactions);
        assert_eq!(metrics.available_budget, Money::from_cents(300000 - 4580));
    }

    #[test]
    fn test_zero_everything() {
        let metrics = compute_metrics(&OnboardingProfile::default(), &[], date(2025, 3, 15));
        assert_eq!(metrics.income, Money::zero());
        assert_eq!(metrics.available_budget, Money::zero());
        assert_eq!(metrics.savings_rate, 0.0);
    }

    #[test]
    fn test_load_seeds_empty_ledger() {
        let store = MemoryStore::new();
        let today = date(2025, 3, 15);

        let summary = Dashboard::new(&store, true).load(today).unwrap();

        assert_eq!(summary.metrics.income, Money::from_cents(280000));
        assert_eq!(summary.metrics.fixed_costs, Money::from_cents(99350));
        assert_eq!(summary.recent.len(), RECENT_LIMIT);
        assert_eq!(summary.spending["housing"], Money::from_cents(85000));
    }

    #[test]
    fn test_load_without_seeding_uses_profile() {
        let store = MemoryStore::new();
        save_json(&store, StorageKey::UserProfile, &profile()).unwrap();

        let summary = Dashboard::new(&store, false).load(date(2025, 3, 15)).unwrap();

        assert!(summary.recent.is_empty());
        assert_eq!(summary.metrics.income_source, MetricSource::Profile);
        assert_eq!(summary.breakdown.housing, Money::from_cents(105208));
    }
}
