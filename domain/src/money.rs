//! Currency display for amounts and signed transaction values.

use rust_decimal::{Decimal, RoundingStrategy};
use shared::{Transaction, TransactionType};

/// `$1,234.50`, negative values as `-$12.00`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

/// Amount as shown in transaction lists: `+` for income, `-` for expenses
pub fn format_signed(transaction: &Transaction) -> String {
    let amount = format_currency(transaction.amount.abs());
    match transaction.transaction_type {
        TransactionType::Income => format!("+{}", amount),
        TransactionType::Expense => format!("-{}", amount),
        TransactionType::Transfer => amount,
    }
}

/// CSS modifier for coloring amounts
pub fn amount_class(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "amount-income",
        TransactionType::Expense => "amount-expense",
        TransactionType::Transfer => "amount-transfer",
    }
}
