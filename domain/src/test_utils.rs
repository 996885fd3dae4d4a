//! Fixtures shared by the domain unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::{Account, Goal, Transaction, TransactionType};
use std::str::FromStr;
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn transaction(
    created_at: DateTime<Utc>,
    transaction_type: TransactionType,
    amount: &str,
    description: &str,
) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        account_id: Uuid::nil(),
        goal_id: None,
        amount: dec(amount),
        transaction_type,
        description: description.to_string(),
        category: "General".to_string(),
        is_recurring: false,
        recurrence_frequency: None,
        created_at,
    }
}

/// Transaction at noon UTC on the given day
pub fn transaction_on(
    day: NaiveDate,
    transaction_type: TransactionType,
    amount: &str,
) -> Transaction {
    let created_at = day.and_hms_opt(12, 0, 0).unwrap().and_utc();
    transaction(created_at, transaction_type, amount, "test")
}

pub fn account(name: &str, balance: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        name: name.to_string(),
        color: "#4f46e5".to_string(),
        balance: dec(balance),
    }
}

pub fn goal(name: &str, current: &str, target: &str) -> Goal {
    Goal {
        id: Uuid::new_v4(),
        name: name.to_string(),
        current_amount: dec(current),
        target_amount: dec(target),
        deadline: None,
    }
}
