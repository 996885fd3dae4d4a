//! # Domain
//!
//! Framework-free logic for the finance tracker frontend.
//!
//! Everything in here is plain data in, plain data out so it can be unit
//! tested natively. The Yew frontend owns rendering and browser APIs and
//! calls into these modules for every computation.
//!
//! ## Module Organization
//!
//! - **calendar**: month grid generation, month navigation and month views
//! - **aggregation**: grouping transactions by local date and per-day totals
//! - **date_picker**: open/closed state machine for the date picker control
//! - **date_format**: user-preferred display patterns for dates
//! - **session**: auth session lifecycle and the errors shown on auth forms
//! - **validation**: auth form and new-transaction input checks
//! - **money**: currency display
//! - **deletion**: the "old transaction" deletion policy
//! - **summary**: dashboard totals and goal progress
//! - **theme**: light/dark theme preference

pub mod aggregation;
pub mod calendar;
pub mod date_format;
pub mod date_picker;
pub mod deletion;
pub mod money;
pub mod session;
pub mod summary;
pub mod theme;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use aggregation::{aggregate, group_by_local_date, DayBuckets};
pub use calendar::{CalendarService, WeekStart};
pub use date_format::{DateFormatPreference, DateFormatter};
pub use date_picker::{DatePickerEvent, DatePickerOutcome, DatePickerState, PickerDay};
pub use deletion::DeletionPolicy;
pub use money::{format_currency, format_signed};
pub use session::{AuthError, RecoveryTokens, Session, SessionAction, SessionState};
pub use summary::{DashboardSummary, GoalProgress};
pub use theme::Theme;
pub use validation::{AuthFormError, TransactionInput, TransactionInputError};
