//! Dashboard totals and goal progress.

use crate::aggregation::{aggregate, local_date_key};
use chrono::{Datelike, NaiveDate, TimeZone};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{Account, DayAggregate, Goal, Transaction};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub goal_id: Uuid,
    pub name: String,
    pub current_amount: Decimal,
    pub target_amount: Decimal,
    /// 0..=100, whole percent
    pub percent: u8,
    pub completed: bool,
}

impl GoalProgress {
    pub fn from_goal(goal: &Goal) -> Self {
        let percent = if goal.target_amount <= Decimal::ZERO {
            0
        } else {
            let ratio = goal.current_amount * Decimal::ONE_HUNDRED / goal.target_amount;
            ratio
                .floor()
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                .to_u8()
                .unwrap_or(0)
        };

        Self {
            goal_id: goal.id,
            name: goal.name.clone(),
            current_amount: goal.current_amount,
            target_amount: goal.target_amount,
            percent,
            completed: goal.target_amount > Decimal::ZERO && goal.current_amount >= goal.target_amount,
        }
    }
}

/// Figures shown on the dashboard cards
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_balance: Decimal,
    /// Income/expense for the month containing the reference date
    pub month: DayAggregate,
    pub goals: Vec<GoalProgress>,
    /// Newest first
    pub recent: Vec<Transaction>,
}

impl DashboardSummary {
    pub const RECENT_LIMIT: usize = 5;

    pub fn compute<Tz: TimeZone>(
        accounts: &[Account],
        goals: &[Goal],
        transactions: &[Transaction],
        reference: NaiveDate,
        tz: &Tz,
    ) -> Self {
        let total_balance = accounts.iter().map(|a| a.balance).sum();

        let month = aggregate(transactions.iter().filter(|t| {
            let day = local_date_key(&t.created_at, tz);
            day.year() == reference.year() && day.month() == reference.month()
        }));

        let mut recent: Vec<Transaction> = transactions.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(Self::RECENT_LIMIT);

        Self {
            total_balance,
            month,
            goals: goals.iter().map(GoalProgress::from_goal).collect(),
            recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{account, date, dec, goal, transaction, transaction_on, utc};
    use chrono::Utc;
    use shared::TransactionType;

    #[test]
    fn test_goal_progress() {
        assert_eq!(GoalProgress::from_goal(&goal("Trip", "250", "1000")).percent, 25);
        assert_eq!(GoalProgress::from_goal(&goal("Trip", "333", "1000")).percent, 33);
        assert_eq!(GoalProgress::from_goal(&goal("Trip", "0", "1000")).percent, 0);

        let done = GoalProgress::from_goal(&goal("Car", "1500", "1000"));
        assert_eq!(done.percent, 100);
        assert!(done.completed);
    }

    #[test]
    fn test_goal_progress_edge_targets() {
        let zero_target = GoalProgress::from_goal(&goal("Empty", "50", "0"));
        assert_eq!(zero_target.percent, 0);
        assert!(!zero_target.completed);

        let overdrawn = GoalProgress::from_goal(&goal("Odd", "-10", "100"));
        assert_eq!(overdrawn.percent, 0);
    }

    #[test]
    fn test_compute_summary() {
        let accounts = vec![account("Checking", "1200.50"), account("Savings", "300")];
        let goals = vec![goal("Trip", "100", "400")];
        let transactions = vec![
            transaction_on(date(2024, 3, 5), TransactionType::Income, "2000"),
            transaction_on(date(2024, 3, 6), TransactionType::Expense, "150.25"),
            transaction_on(date(2024, 3, 7), TransactionType::Transfer, "300"),
            transaction_on(date(2024, 2, 28), TransactionType::Expense, "99"),
        ];

        let summary = DashboardSummary::compute(&accounts, &goals, &transactions, date(2024, 3, 15), &Utc);

        assert_eq!(summary.total_balance, dec("1500.50"));
        assert_eq!(summary.month.income, dec("2000"));
        assert_eq!(summary.month.expense, dec("150.25"));
        assert_eq!(summary.month.net, dec("1849.75"));
        assert_eq!(summary.month.count, 3);
        assert_eq!(summary.goals[0].percent, 25);
        assert_eq!(summary.recent[0].created_at.date_naive(), date(2024, 3, 7));
        assert_eq!(summary.recent.len(), 4);
    }

    #[test]
    fn test_recent_is_capped() {
        let transactions: Vec<Transaction> = (1..=8)
            .map(|day| transaction(utc(2024, 3, day, 9, 0), TransactionType::Expense, "1", "coffee"))
            .collect();

        let summary = DashboardSummary::compute(&[], &[], &transactions, date(2024, 3, 1), &Utc);

        assert_eq!(summary.recent.len(), DashboardSummary::RECENT_LIMIT);
        assert_eq!(summary.recent[0].created_at, utc(2024, 3, 8, 9, 0));
        assert_eq!(summary.total_balance, Decimal::ZERO);
    }
}
