use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single user-entered financial event as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    /// Account the money moved in or out of
    pub account_id: Uuid,
    /// Savings goal this transaction contributes to, if any
    #[serde(default)]
    pub goal_id: Option<Uuid>,
    /// Always non-negative; direction comes from `transaction_type`
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    /// Creation timestamp (RFC 3339 on the wire)
    pub created_at: DateTime<Utc>,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into an account
    Income,
    /// Money leaving an account
    Expense,
    /// Money moved between the user's own accounts
    Transfer,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }

    /// Parse the lowercase wire name
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Transfer => "Transfer",
        };
        write!(f, "{}", label)
    }
}

/// How often a recurring transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceFrequency {
    pub const ALL: [RecurrenceFrequency; 4] = [
        RecurrenceFrequency::Daily,
        RecurrenceFrequency::Weekly,
        RecurrenceFrequency::Monthly,
        RecurrenceFrequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Daily => "daily",
            RecurrenceFrequency::Weekly => "weekly",
            RecurrenceFrequency::Monthly => "monthly",
            RecurrenceFrequency::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecurrenceFrequency::Daily => "Daily",
            RecurrenceFrequency::Weekly => "Weekly",
            RecurrenceFrequency::Monthly => "Monthly",
            RecurrenceFrequency::Yearly => "Yearly",
        };
        write!(f, "{}", label)
    }
}

/// Named money container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// CSS color used for chips and legends (e.g. "#4f46e5")
    #[serde(default)]
    pub color: String,
    pub balance: Decimal,
}

/// Savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub current_amount: Decimal,
    pub target_amount: Decimal,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// User profile row kept next to the auth user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    /// One of the supported display patterns, e.g. "MM/dd/yyyy"
    #[serde(default)]
    pub date_format: Option<String>,
}

/// Authenticated user as reported by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
}

/// Token grant returned on sign-in and persisted between page loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: SignUpMetadata,
}

/// Extra user metadata stored with a new account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpMetadata {
    pub full_name: String,
}

/// Sign-up either returns a live session or only the user when email
/// confirmation is required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(AuthSession),
    PendingConfirmation(AuthUser),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// Body of a failed auth or data call. Different endpoints fill
/// different fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderErrorBody {
    /// Most specific human-readable reason available
    pub fn reason(&self) -> Option<&str> {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
            .filter(|reason| !reason.trim().is_empty())
    }
}

/// Insert body for a new transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: Uuid,
    pub goal_id: Option<Uuid>,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub category: String,
    pub is_recurring: bool,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub created_at: DateTime<Utc>,
}

/// Income/expense totals for a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub income: Decimal,
    pub expense: Decimal,
    /// income - expense
    pub net: Decimal,
    /// Every transaction keyed to the day, transfers included
    pub count: usize,
}

impl DayAggregate {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// One cell of a month view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for leading/trailing days of adjacent months
    pub in_current_month: bool,
    pub is_today: bool,
    /// Transactions created on this local date, in input order
    pub transactions: Vec<Transaction>,
    pub aggregate: DayAggregate,
}

impl CalendarDay {
    /// Only days with transactions open a detail view
    pub fn is_selectable(&self) -> bool {
        !self.aggregate.is_empty()
    }
}

/// Month grid with per-day data, always whole weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonthView {
    /// First day of the displayed month
    pub month_start: NaiveDate,
    pub days: Vec<CalendarDay>,
    /// Totals over the days inside the displayed month
    pub totals: DayAggregate,
}
