//! Grouping transactions by local calendar date.
//!
//! Transactions carry a UTC creation timestamp. The calendar shows them on
//! the viewer's local date, so bucketing converts each timestamp into the
//! caller-supplied timezone and drops the time of day. Buckets are rebuilt
//! from the latest transaction list on every render and never cached.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shared::{DayAggregate, Transaction, TransactionType};
use std::collections::BTreeMap;

/// Local date key for a timestamp: year-month-day in `tz`
pub fn local_date_key<Tz: TimeZone>(created_at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    created_at.with_timezone(tz).date_naive()
}

/// Transactions partitioned by local date.
///
/// Within a day, transactions keep the order they had in the input list.
#[derive(Debug, Clone, Default)]
pub struct DayBuckets<'a> {
    buckets: BTreeMap<NaiveDate, Vec<&'a Transaction>>,
}

impl<'a> DayBuckets<'a> {
    /// Transactions keyed to `date`, empty when there are none
    pub fn transactions_on(&self, date: NaiveDate) -> &[&'a Transaction] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn aggregate_for(&self, date: NaiveDate) -> DayAggregate {
        aggregate(self.transactions_on(date).iter().copied())
    }

    /// Dates that have at least one transaction, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[&'a Transaction])> + '_ {
        self.buckets.iter().map(|(date, txs)| (*date, txs.as_slice()))
    }

    /// Number of non-empty days
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Partition `transactions` into per-day buckets using local dates in `tz`
pub fn group_by_local_date<'a, Tz: TimeZone>(
    transactions: &'a [Transaction],
    tz: &Tz,
) -> DayBuckets<'a> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a Transaction>> = BTreeMap::new();

    for transaction in transactions {
        let key = local_date_key(&transaction.created_at, tz);
        buckets.entry(key).or_default().push(transaction);
    }

    log::debug!(
        "grouped {} transactions into {} days",
        transactions.len(),
        buckets.len()
    );

    DayBuckets { buckets }
}

/// Income, expense, net and count over a set of transactions.
///
/// Transfers are counted but contribute to neither income nor expense.
pub fn aggregate<'a, I>(transactions: I) -> DayAggregate
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = DayAggregate::default();

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => totals.income += transaction.amount,
            TransactionType::Expense => totals.expense += transaction.amount,
            TransactionType::Transfer => {}
        }
        totals.count += 1;
    }

    totals.net = totals.income - totals.expense;
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, dec, transaction, transaction_on, utc};
    use chrono::FixedOffset;
    use rust_decimal::Decimal;

    #[test]
    fn test_march_example() {
        let transactions = vec![
            transaction_on(date(2024, 3, 5), TransactionType::Income, "100"),
            transaction_on(date(2024, 3, 5), TransactionType::Expense, "40"),
            transaction_on(date(2024, 3, 6), TransactionType::Transfer, "25"),
        ];

        let buckets = group_by_local_date(&transactions, &Utc);

        assert_eq!(
            buckets.aggregate_for(date(2024, 3, 5)),
            DayAggregate {
                income: dec("100"),
                expense: dec("40"),
                net: dec("60"),
                count: 2,
            }
        );
        assert_eq!(
            buckets.aggregate_for(date(2024, 3, 6)),
            DayAggregate {
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                net: Decimal::ZERO,
                count: 1,
            }
        );
    }

    #[test]
    fn test_empty_day_is_all_zeros() {
        let transactions = vec![transaction_on(date(2024, 3, 5), TransactionType::Income, "10")];
        let buckets = group_by_local_date(&transactions, &Utc);

        assert!(buckets.transactions_on(date(2024, 3, 7)).is_empty());
        assert_eq!(buckets.aggregate_for(date(2024, 3, 7)), DayAggregate::default());
    }

    #[test]
    fn test_bucketing_uses_local_date() {
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let transactions = vec![
            // 21:00 local on the 5th
            transaction(utc(2024, 3, 6, 2, 0), TransactionType::Expense, "12", "late dinner"),
            // 18:30 local on the 5th
            transaction(utc(2024, 3, 5, 23, 30), TransactionType::Income, "50", "refund"),
            // 00:30 local on the 6th
            transaction(utc(2024, 3, 6, 5, 30), TransactionType::Expense, "3", "coffee"),
        ];

        let buckets = group_by_local_date(&transactions, &eastern);

        assert_eq!(buckets.transactions_on(date(2024, 3, 5)).len(), 2);
        assert_eq!(buckets.transactions_on(date(2024, 3, 6)).len(), 1);

        // Same list in UTC lands on different days
        let utc_buckets = group_by_local_date(&transactions, &Utc);
        assert_eq!(utc_buckets.transactions_on(date(2024, 3, 5)).len(), 1);
        assert_eq!(utc_buckets.transactions_on(date(2024, 3, 6)).len(), 2);
    }

    #[test]
    fn test_within_day_order_is_insertion_order() {
        let transactions = vec![
            transaction(utc(2024, 3, 5, 20, 0), TransactionType::Expense, "1", "evening"),
            transaction(utc(2024, 3, 5, 8, 0), TransactionType::Expense, "2", "morning"),
            transaction(utc(2024, 3, 5, 12, 0), TransactionType::Income, "3", "noon"),
        ];

        let buckets = group_by_local_date(&transactions, &Utc);
        let descriptions: Vec<&str> = buckets
            .transactions_on(date(2024, 3, 5))
            .iter()
            .map(|t| t.description.as_str())
            .collect();

        assert_eq!(descriptions, vec!["evening", "morning", "noon"]);
    }

    #[test]
    fn test_dates_are_sorted() {
        let transactions = vec![
            transaction_on(date(2024, 4, 1), TransactionType::Income, "1"),
            transaction_on(date(2024, 2, 29), TransactionType::Income, "1"),
            transaction_on(date(2024, 3, 15), TransactionType::Income, "1"),
        ];

        let buckets = group_by_local_date(&transactions, &Utc);
        let dates: Vec<NaiveDate> = buckets.dates().collect();

        assert_eq!(dates, vec![date(2024, 2, 29), date(2024, 3, 15), date(2024, 4, 1)]);
        assert_eq!(buckets.len(), 3);
    }

    /// Deterministic pseudo-random transaction lists spread over two months
    fn generated_transactions(seed: u64, len: usize) -> Vec<Transaction> {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u32
        };

        (0..len)
            .map(|_| {
                let day = next() % 59;
                let hour = next() % 24;
                let created_at = utc(2024, 3, 1, hour, next() % 60) + chrono::Duration::days(day as i64);
                let transaction_type = TransactionType::ALL[(next() % 3) as usize];
                let amount = format!("{}.{:02}", next() % 500, next() % 100);
                transaction(created_at, transaction_type, &amount, "generated")
            })
            .collect()
    }

    #[test]
    fn test_daily_sums_match_list_totals() {
        let offsets = [
            FixedOffset::east_opt(0).unwrap(),
            FixedOffset::west_opt(8 * 3600).unwrap(),
            FixedOffset::east_opt(9 * 3600 + 1800).unwrap(),
        ];

        for seed in 1..20u64 {
            let transactions = generated_transactions(seed, 40);
            for offset in &offsets {
                let buckets = group_by_local_date(&transactions, offset);

                let mut income = Decimal::ZERO;
                let mut expense = Decimal::ZERO;
                let mut count = 0;
                for day in buckets.dates() {
                    let totals = buckets.aggregate_for(day);
                    income += totals.income;
                    expense += totals.expense;
                    count += totals.count;
                }

                let expected_income: Decimal = transactions
                    .iter()
                    .filter(|t| t.transaction_type == TransactionType::Income)
                    .map(|t| t.amount)
                    .sum();
                let expected_expense: Decimal = transactions
                    .iter()
                    .filter(|t| t.transaction_type == TransactionType::Expense)
                    .map(|t| t.amount)
                    .sum();

                assert_eq!(income, expected_income);
                assert_eq!(expense, expected_expense);
                assert_eq!(count, transactions.len());
            }
        }
    }

    #[test]
    fn test_bucket_count_matches_local_date_matches() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let transactions = generated_transactions(42, 60);
        let buckets = group_by_local_date(&transactions, &offset);

        for (day, txs) in buckets.iter() {
            let expected = transactions
                .iter()
                .filter(|t| local_date_key(&t.created_at, &offset) == day)
                .count();
            assert_eq!(txs.len(), expected);
            assert_eq!(buckets.aggregate_for(day).count, expected);
        }
    }

    #[test]
    fn test_aggregate_transfers_only() {
        let transactions = vec![
            transaction_on(date(2024, 1, 1), TransactionType::Transfer, "10"),
            transaction_on(date(2024, 1, 1), TransactionType::Transfer, "15"),
        ];

        let totals = aggregate(&transactions);
        assert_eq!(totals.income, Decimal::ZERO);
        assert_eq!(totals.expense, Decimal::ZERO);
        assert_eq!(totals.net, Decimal::ZERO);
        assert_eq!(totals.count, 2);
    }
}
