//! Transaction ledger
//!
//! CRUD, filtering and totals over the list of transactions stored under
//! [`StorageKey::Transactions`]. Every operation reads the full list from the
//! store; queries are plain scans.
//!
//! Reads that fail (missing or malformed data) yield an empty ledger. Writes
//! that fail are logged and otherwise ignored, so a mutation still returns
//! its result even when persisting it did not succeed.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, error, info};

use crate::error::{MoneyUpError, MoneyUpResult};
use crate::models::{
    DateRange, Money, NewTransaction, Transaction, TransactionId, TransactionPatch,
    TransactionType,
};
use crate::storage::{load_or_default, save_json, KeyValueStore, StorageKey};

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub range: Option<DateRange>,
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a single transaction against every criterion except the limit
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.range.map_or(true, |r| r.contains(txn.date))
            && self.category.as_deref().map_or(true, |c| txn.category == c)
            && self.kind.map_or(true, |k| txn.kind == k)
    }
}

/// Sum the amounts of one type, optionally restricted to a date range
pub fn sum_amounts<'t, I>(transactions: I, kind: TransactionType, range: Option<DateRange>) -> Money
where
    I: IntoIterator<Item = &'t Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind == kind)
        .filter(|t| range.map_or(true, |r| r.contains(t.date)))
        .map(|t| t.amount)
        .sum()
}

/// The five demo records inserted into an empty ledger
pub fn sample_transactions(today: NaiveDate) -> Vec<NewTransaction> {
    let yesterday = today.pred_opt().unwrap_or(today);
    let two_days_ago = yesterday.pred_opt().unwrap_or(yesterday);

    vec![
        NewTransaction::new(
            Money::from_cents(280000),
            "Monthly salary",
            "salary",
            TransactionType::Income,
            today,
        ),
        NewTransaction::new(
            Money::from_cents(4580),
            "Supermarket shopping",
            "groceries",
            TransactionType::Expense,
            today,
        ),
        NewTransaction::new(
            Money::from_cents(6520),
            "Petrol station",
            "transport",
            TransactionType::Expense,
            yesterday,
        ),
        NewTransaction::new(
            Money::from_cents(85000),
            "Rent",
            "housing",
            TransactionType::Expense,
            today,
        ),
        NewTransaction::new(
            Money::from_cents(3250),
            "Restaurant",
            "restaurant",
            TransactionType::Expense,
            two_days_ago,
        ),
    ]
}

/// A timestamp strictly after `previous`, normally the current time
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Service for ledger management
pub struct Ledger<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> Ledger<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All transactions in insertion order
    pub fn list(&self) -> Vec<Transaction> {
        load_or_default(self.store, StorageKey::Transactions)
    }

    fn persist(&self, transactions: &[Transaction]) {
        if let Err(e) = save_json(self.store, StorageKey::Transactions, transactions) {
            error!(error = %e, count = transactions.len(), "failed to save transactions");
        }
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Find a transaction by full id or by the short code shown in listings
    ///
    /// Short codes may be abbreviated to at least four characters as long as
    /// they stay unambiguous.
    pub fn find(&self, identifier: &str) -> MoneyUpResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return Ok(self.get(id));
        }

        let fragment = identifier.trim();
        let fragment = fragment.strip_prefix("txn-").unwrap_or(fragment).to_lowercase();
        if fragment.len() < 4 {
            return Err(MoneyUpError::Validation(format!(
                "Transaction id '{}' is too short; use at least four characters",
                identifier
            )));
        }

        let mut matches: Vec<Transaction> = self
            .list()
            .into_iter()
            .filter(|t| t.id.short().starts_with(&fragment))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(MoneyUpError::Validation(format!(
                "Transaction id '{}' is ambiguous ({} matches)",
                identifier, n
            ))),
        }
    }

    /// Validate and append a new transaction
    pub fn add(&self, input: NewTransaction) -> MoneyUpResult<Transaction> {
        input
            .validate()
            .map_err(|e| MoneyUpError::Validation(e.to_string()))?;

        let txn = Transaction::from_input(input, Utc::now());

        let mut transactions = self.list();
        transactions.push(txn.clone());
        self.persist(&transactions);

        debug!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "added transaction");
        Ok(txn)
    }

    /// Apply a partial update, bumping `updated_at`
    pub fn update(&self, id: TransactionId, patch: TransactionPatch) -> MoneyUpResult<Transaction> {
        let mut transactions = self.list();
        let index = transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| MoneyUpError::transaction_not_found(id.to_string()))?;

        let mut txn = transactions[index].clone();
        txn.apply(patch);
        txn.validate()
            .map_err(|e| MoneyUpError::Validation(e.to_string()))?;
        txn.updated_at = next_timestamp(txn.updated_at);

        transactions[index] = txn.clone();
        self.persist(&transactions);

        debug!(id = %txn.id, "updated transaction");
        Ok(txn)
    }

    /// Remove a transaction, returning whether anything was removed
    pub fn delete(&self, id: TransactionId) -> bool {
        let mut transactions = self.list();
        let before = transactions.len();
        transactions.retain(|t| t.id != id);

        if transactions.len() == before {
            return false;
        }

        self.persist(&transactions);
        debug!(id = %id, "deleted transaction");
        true
    }

    pub fn by_date_range(&self, range: DateRange) -> Vec<Transaction> {
        self.query(&TransactionFilter::new().date_range(range))
    }

    pub fn by_category(&self, category: &str) -> Vec<Transaction> {
        self.query(&TransactionFilter::new().category(category))
    }

    pub fn by_type(&self, kind: TransactionType) -> Vec<Transaction> {
        self.query(&TransactionFilter::new().kind(kind))
    }

    /// Transactions matching `filter`, in insertion order
    pub fn query(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let mut transactions: Vec<_> = self
            .list()
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        transactions
    }

    /// Most recent transactions: latest date first, then latest created
    pub fn recent(&self, limit: usize) -> Vec<Transaction> {
        let mut transactions = self.list();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        transactions.truncate(limit);
        transactions
    }

    pub fn total_income(&self, range: Option<DateRange>) -> Money {
        sum_amounts(&self.list(), TransactionType::Income, range)
    }

    pub fn total_expenses(&self, range: Option<DateRange>) -> Money {
        sum_amounts(&self.list(), TransactionType::Expense, range)
    }

    /// Income minus expenses
    pub fn balance(&self, range: Option<DateRange>) -> Money {
        let transactions = self.list();
        sum_amounts(&transactions, TransactionType::Income, range)
            - sum_amounts(&transactions, TransactionType::Expense, range)
    }

    /// Expense totals keyed by category
    pub fn spending_by_category(&self, range: Option<DateRange>) -> BTreeMap<String, Money> {
        let mut totals = BTreeMap::new();
        for txn in self.list() {
            if txn.kind != TransactionType::Expense {
                continue;
            }
            if range.map_or(false, |r| !r.contains(txn.date)) {
                continue;
            }
            *totals.entry(txn.category).or_insert_with(Money::zero) += txn.amount;
        }
        totals
    }

    /// Insert the demo records if the ledger is empty
    ///
    /// Returns the inserted records; empty when the ledger already had data.
    pub fn seed_sample_data(&self, today: NaiveDate) -> MoneyUpResult<Vec<Transaction>> {
        if !self.is_empty() {
            return Ok(Vec::new());
        }

        let seeded = sample_transactions(today)
            .into_iter()
            .map(|input| self.add(input))
            .collect::<MoneyUpResult<Vec<_>>>()?;

        info!(count = seeded.len(), "seeded sample transactions");
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64, category: &str, on: NaiveDate) -> NewTransaction {
        NewTransaction::new(
            Money::from_cents(cents),
            "Test expense",
            category,
            TransactionType::Expense,
            on,
        )
    }

    fn income(cents: i64, on: NaiveDate) -> NewTransaction {
        NewTransaction::new(
            Money::from_cents(cents),
            "Test income",
            "salary",
            TransactionType::Income,
            on,
        )
    }

    #[test]
    fn test_empty_ledger() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        assert!(ledger.is_empty());
        assert_eq!(ledger.balance(None), Money::zero());
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let huge = Money::parse("50000000000000000").unwrap();

        let err = ledger
            .add(income(huge.cents(), date(2025, 1, 15)))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());

        let added = ledger.add(income(100, date(2025, 1, 15))).unwrap();
        let err = ledger
            .update(added.id, TransactionPatch::new().amount(huge))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.get(added.id).unwrap().amount, Money::from_cents(100));
    }

    #[test]
    fn test_largest_amounts_total_and_round_trip() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        for _ in 0..3 {
            ledger.add(income(Money::MAX.cents(), date(2025, 1, 15))).unwrap();
        }
        let odd = ledger
            .add(expense(Money::MAX.cents() - 1, "housing", date(2025, 1, 15)))
            .unwrap();

        assert_eq!(ledger.total_income(None).cents(), 3 * Money::MAX.cents());
        assert_eq!(ledger.balance(None).cents(), 2 * Money::MAX.cents() + 1);
        assert_eq!(ledger.get(odd.id).unwrap().amount, odd.amount);
    }

    #[test]
    fn test_add_then_query_returns_input_plus_generated_fields() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let input = expense(4580, "groceries", date(2025, 1, 15));

        let added = ledger.add(input.clone()).unwrap();
        let stored = ledger.get(added.id).unwrap();

        assert_eq!(stored, added);
        assert_eq!(stored.amount, input.amount);
        assert_eq!(stored.description, input.description);
        assert_eq!(stored.category, input.category);
        assert_eq!(stored.kind, input.kind);
        assert_eq!(stored.date, input.date);
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[test]
    fn test_add_appends_in_order() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let first = ledger.add(expense(100, "groceries", date(2025, 1, 20))).unwrap();
        let second = ledger.add(expense(200, "groceries", date(2025, 1, 10))).unwrap();

        let all = ledger.list();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);

        let err = ledger.add(expense(0, "groceries", date(2025, 1, 1))).unwrap_err();
        assert!(err.is_validation());

        let err = ledger.add(expense(100, "lottery", date(2025, 1, 1))).unwrap_err();
        assert!(err.is_validation());

        let mut blank = expense(100, "groceries", date(2025, 1, 1));
        blank.description = String::new();
        assert!(ledger.add(blank).unwrap_err().is_validation());

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_update_reflects_fields_and_bumps_timestamp() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let added = ledger.add(expense(4580, "groceries", date(2025, 1, 15))).unwrap();

        let updated = ledger
            .update(
                added.id,
                TransactionPatch::new()
                    .amount(Money::from_cents(5000))
                    .description("Weekly shop"),
            )
            .unwrap();

        let reread = ledger.get(added.id).unwrap();
        assert_eq!(reread, updated);
        assert_eq!(reread.amount.cents(), 5000);
        assert_eq!(reread.description, "Weekly shop");
        assert_eq!(reread.category, "groceries");
        assert_eq!(reread.created_at, added.created_at);
        assert!(reread.updated_at > added.updated_at);
    }

    #[test]
    fn test_consecutive_updates_strictly_increase_timestamp() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let added = ledger.add(expense(100, "groceries", date(2025, 1, 15))).unwrap();

        let first = ledger.update(added.id, TransactionPatch::new()).unwrap();
        let second = ledger.update(added.id, TransactionPatch::new()).unwrap();
        assert!(second.updated_at > first.updated_at);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);

        let err = ledger
            .update(TransactionId::new(), TransactionPatch::new().description("x"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_rejects_negative_amount() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let added = ledger.add(expense(100, "groceries", date(2025, 1, 15))).unwrap();

        let err = ledger
            .update(added.id, TransactionPatch::new().amount(Money::from_cents(-100)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.get(added.id).unwrap().amount.cents(), 100);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let added = ledger.add(expense(100, "groceries", date(2025, 1, 15))).unwrap();

        assert!(ledger.delete(added.id));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_delete_missing_leaves_ledger_unchanged() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        ledger.add(expense(100, "groceries", date(2025, 1, 15))).unwrap();
        let before = store.get_raw(StorageKey::Transactions.as_str()).unwrap();

        assert!(!ledger.delete(TransactionId::new()));
        assert!(!ledger.delete(TransactionId::new()));

        let after = store.get_raw(StorageKey::Transactions.as_str()).unwrap();
        assert_eq!(before, after);
        assert_eq!(ledger.count(), 1);
    }

    #[test]
    fn test_queries() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        ledger.add(expense(100, "groceries", date(2025, 1, 10))).unwrap();
        ledger.add(expense(200, "transport", date(2025, 1, 15))).unwrap();
        ledger.add(income(300, date(2025, 1, 20))).unwrap();

        let range = DateRange::new(date(2025, 1, 12), date(2025, 1, 18));
        let in_range = ledger.by_date_range(range);
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].amount.cents(), 200);

        assert_eq!(ledger.by_category("groceries").len(), 1);
        assert_eq!(ledger.by_type(TransactionType::Expense).len(), 2);
        assert_eq!(ledger.by_type(TransactionType::Income).len(), 1);

        let filtered = ledger.query(
            &TransactionFilter::new()
                .kind(TransactionType::Expense)
                .date_range(DateRange::new(date(2025, 1, 1), date(2025, 1, 31)))
                .limit(1),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].amount.cents(), 100);
    }

    #[test]
    fn test_balance_is_income_minus_expenses_for_any_range() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        ledger.add(income(250000, date(2025, 1, 1))).unwrap();
        ledger.add(expense(4580, "groceries", date(2025, 1, 5))).unwrap();
        ledger.add(income(10000, date(2025, 2, 1))).unwrap();
        ledger.add(expense(85000, "housing", date(2025, 2, 3))).unwrap();

        let ranges = [
            None,
            Some(DateRange::month_of(date(2025, 1, 1))),
            Some(DateRange::month_of(date(2025, 2, 1))),
            Some(DateRange::new(date(2025, 1, 3), date(2025, 2, 2))),
            Some(DateRange::new(date(2025, 3, 1), date(2025, 2, 1))),
        ];
        for range in ranges {
            assert_eq!(
                ledger.total_income(range) - ledger.total_expenses(range),
                ledger.balance(range)
            );
        }
        assert_eq!(ledger.balance(None).cents(), 170420);
    }

    #[test]
    fn test_spending_by_category() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        ledger.add(expense(100, "groceries", date(2025, 1, 10))).unwrap();
        ledger.add(expense(250, "groceries", date(2025, 1, 11))).unwrap();
        ledger.add(expense(700, "transport", date(2025, 2, 1))).unwrap();
        ledger.add(income(999, date(2025, 1, 10))).unwrap();

        let all = ledger.spending_by_category(None);
        assert_eq!(all.len(), 2);
        assert_eq!(all["groceries"].cents(), 350);
        assert_eq!(all["transport"].cents(), 700);

        let january = ledger.spending_by_category(Some(DateRange::month_of(date(2025, 1, 1))));
        assert_eq!(january.len(), 1);
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        ledger.add(expense(100, "groceries", date(2025, 1, 10))).unwrap();
        ledger.add(expense(200, "groceries", date(2025, 1, 20))).unwrap();
        ledger.add(expense(300, "groceries", date(2025, 1, 15))).unwrap();

        let recent = ledger.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].amount.cents(), 200);
        assert_eq!(recent[1].amount.cents(), 300);
    }

    #[test]
    fn test_seed_sample_data_totals() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let today = date(2025, 3, 15);

        let seeded = ledger.seed_sample_data(today).unwrap();
        assert_eq!(seeded.len(), 5);

        assert_eq!(ledger.total_income(None).cents(), 280000);
        assert_eq!(ledger.total_expenses(None).cents(), 99350);
        assert_eq!(ledger.balance(None).cents(), 180650);

        let dates: Vec<_> = ledger.list().iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![today, today, date(2025, 3, 14), today, date(2025, 3, 13)]
        );
    }

    #[test]
    fn test_seed_is_noop_when_not_empty() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        ledger.add(expense(100, "groceries", date(2025, 1, 10))).unwrap();

        assert!(ledger.seed_sample_data(date(2025, 1, 10)).unwrap().is_empty());
        assert_eq!(ledger.count(), 1);
    }

    #[test]
    fn test_corrupt_storage_reads_as_empty() {
        let store = MemoryStore::new();
        store
            .set_raw(StorageKey::Transactions.as_str(), "{not a list")
            .unwrap();
        let ledger = Ledger::new(&store);

        assert!(ledger.is_empty());
        let added = ledger.add(expense(100, "groceries", date(2025, 1, 10))).unwrap();
        assert_eq!(ledger.list(), vec![added]);
    }

    #[test]
    fn test_find_by_short_code() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(&store);
        let added = ledger.add(expense(100, "groceries", date(2025, 1, 10))).unwrap();

        let by_display = ledger.find(&added.id.to_string()).unwrap().unwrap();
        assert_eq!(by_display.id, added.id);

        let by_full = ledger
            .find(&added.id.as_uuid().to_string())
            .unwrap()
            .unwrap();
        assert_eq!(by_full.id, added.id);

        assert!(ledger.find("abc").unwrap_err().is_validation());
    }
}
