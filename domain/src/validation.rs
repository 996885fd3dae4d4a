//! Input checks run before anything is sent to the backend.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use shared::{CreateTransactionRequest, RecurrenceFrequency, TransactionType};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFormError {
    #[error("Email is required")]
    EmptyEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password is required")]
    EmptyPassword,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Name is required")]
    EmptyName,
}

pub fn validate_email(email: &str) -> Result<(), AuthFormError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthFormError::EmptyEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(AuthFormError::InvalidEmail),
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthFormError> {
    if password.is_empty() {
        Err(AuthFormError::EmptyPassword)
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        Err(AuthFormError::PasswordTooShort)
    } else {
        Ok(())
    }
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), AuthFormError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(AuthFormError::EmptyPassword);
    }
    Ok(())
}

pub fn validate_sign_up(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AuthFormError> {
    if name.trim().is_empty() {
        return Err(AuthFormError::EmptyName);
    }
    validate_email(email)?;
    validate_new_password(password, confirm_password)
}

pub fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), AuthFormError> {
    validate_password(password)?;
    if password != confirm_password {
        return Err(AuthFormError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionInputError {
    #[error("Amount is required")]
    EmptyAmount,
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
    #[error("Amount can have at most two decimal places")]
    TooManyDecimals,
    #[error("Description is required")]
    EmptyDescription,
    #[error("Description is too long ({0} characters, max {})", MAX_DESCRIPTION_LENGTH)]
    DescriptionTooLong(usize),
    #[error("Choose an account")]
    MissingAccount,
    #[error("Choose how often this transaction repeats")]
    MissingFrequency,
    #[error("A repeating transaction can't start before today")]
    RecurringStartsInPast,
}

/// Raw values from the add-transaction form
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub amount: String,
    pub transaction_type: TransactionType,
    pub description: String,
    pub category: String,
    pub account_id: Option<Uuid>,
    pub goal_id: Option<Uuid>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub frequency: Option<RecurrenceFrequency>,
}

impl TransactionInput {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            transaction_type: TransactionType::Expense,
            description: String::new(),
            category: String::new(),
            account_id: None,
            goal_id: None,
            date,
            is_recurring: false,
            frequency: None,
        }
    }

    pub fn parse_amount(&self) -> Result<Decimal, TransactionInputError> {
        let cleaned = self.amount.trim().trim_start_matches('$').replace(',', "");
        if cleaned.is_empty() {
            return Err(TransactionInputError::EmptyAmount);
        }
        let amount = Decimal::from_str(&cleaned)
            .map_err(|_| TransactionInputError::InvalidAmount(self.amount.trim().to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(TransactionInputError::AmountNotPositive);
        }
        if amount.normalize().scale() > 2 {
            return Err(TransactionInputError::TooManyDecimals);
        }
        Ok(amount)
    }

    /// Every problem with the input, in form order. `today` is the user's
    /// local date; recurring transactions may not start before it.
    pub fn errors(&self, today: NaiveDate) -> Vec<TransactionInputError> {
        let mut errors = Vec::new();

        if let Err(e) = self.parse_amount() {
            errors.push(e);
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(TransactionInputError::EmptyDescription);
        } else if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            errors.push(TransactionInputError::DescriptionTooLong(description.chars().count()));
        }

        if self.account_id.is_none() {
            errors.push(TransactionInputError::MissingAccount);
        }
        if self.is_recurring {
            if self.frequency.is_none() {
                errors.push(TransactionInputError::MissingFrequency);
            }
            if self.date < today {
                errors.push(TransactionInputError::RecurringStartsInPast);
            }
        }

        errors
    }

    /// Validated insert body. The chosen date is stamped with `now`'s time
    /// of day in `tz` so it lands on that local date.
    pub fn into_request<Tz: TimeZone>(
        self,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<CreateTransactionRequest, Vec<TransactionInputError>> {
        let today = now.with_timezone(tz).date_naive();
        let errors = self.errors(today);
        if !errors.is_empty() {
            return Err(errors);
        }
        let amount = self.parse_amount().map_err(|e| vec![e])?;
        let account_id = self.account_id.ok_or_else(|| vec![TransactionInputError::MissingAccount])?;

        let local_time = now.with_timezone(tz).time();
        let created_at = tz
            .from_local_datetime(&self.date.and_time(local_time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now);

        Ok(CreateTransactionRequest {
            account_id,
            goal_id: self.goal_id,
            amount,
            transaction_type: self.transaction_type,
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            is_recurring: self.is_recurring,
            recurrence_frequency: if self.is_recurring { self.frequency } else { None },
            created_at,
        })
    }
}
