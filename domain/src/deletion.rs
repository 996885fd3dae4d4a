//! When a transaction may still be deleted.
//!
//! Transactions past the age threshold are "old": the UI hides the delete
//! action for them instead of attempting a delete the backend would reject.

use chrono::{DateTime, Duration, Utc};
use shared::Transaction;

pub const DEFAULT_DELETE_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionPolicy {
    max_age: Duration,
}

impl Default for DeletionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl DeletionPolicy {
    pub fn new() -> Self {
        Self::with_max_age(Duration::hours(DEFAULT_DELETE_WINDOW_HOURS))
    }

    pub fn with_max_age(max_age: Duration) -> Self {
        Self { max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Strictly older than the threshold
    pub fn is_old(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(created_at) > self.max_age
    }

    pub fn is_transaction_old(&self, transaction: &Transaction, now: DateTime<Utc>) -> bool {
        self.is_old(transaction.created_at, now)
    }

    pub fn can_delete(&self, transaction: &Transaction, now: DateTime<Utc>) -> bool {
        !self.is_transaction_old(transaction, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{transaction, utc};
    use shared::TransactionType;

    #[test]
    fn test_default_window_is_a_day() {
        let policy = DeletionPolicy::default();
        let created = utc(2024, 3, 5, 12, 0);
        let tx = transaction(created, TransactionType::Expense, "10", "lunch");

        assert!(policy.can_delete(&tx, utc(2024, 3, 5, 12, 0)));
        assert!(policy.can_delete(&tx, utc(2024, 3, 6, 12, 0)));
        assert!(policy.is_transaction_old(&tx, utc(2024, 3, 6, 12, 1)));
    }

    #[test]
    fn test_custom_window() {
        let policy = DeletionPolicy::with_max_age(Duration::days(30));
        let tx = transaction(utc(2024, 3, 1, 0, 0), TransactionType::Income, "10", "pay");

        assert!(!policy.is_transaction_old(&tx, utc(2024, 3, 20, 0, 0)));
        assert!(policy.is_transaction_old(&tx, utc(2024, 4, 1, 0, 0)));
    }

    #[test]
    fn test_future_dated_transaction_is_not_old() {
        let policy = DeletionPolicy::default();
        let tx = transaction(utc(2024, 3, 10, 0, 0), TransactionType::Expense, "5", "later");
        assert!(policy.can_delete(&tx, utc(2024, 3, 5, 0, 0)));
    }
}
