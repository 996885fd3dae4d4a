//! Calendar domain logic for the finance tracker.
//!
//! This module builds the month grids used by both the transaction
//! calendar and the date picker, handles month navigation, and joins a
//! grid with per-day transaction buckets into a renderable month view.
//! The UI only draws what `CalendarService` hands it.

use crate::aggregation::{aggregate, group_by_local_date};
use chrono::{Datelike, Months, NaiveDate, TimeZone, Weekday};
use shared::{CalendarDay, CalendarMonthView, Transaction};

/// First column of the calendar grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Days between the start of the week and `date`
    fn offset_of(self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }
}

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Calendar service that handles grid generation and month navigation
#[derive(Debug, Clone, Default)]
pub struct CalendarService {
    week_start: WeekStart,
}

impl CalendarService {
    /// Create a service with Sunday-first weeks
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_week_start(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Header text for the month containing `reference`, e.g. "March 2024"
    pub fn month_label(&self, reference: NaiveDate) -> String {
        format!("{} {}", self.month_name(reference.month()), reference.year())
    }

    /// Weekday header labels starting at the configured week start
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        let mut labels = WEEKDAY_LABELS;
        if self.week_start == WeekStart::Monday {
            labels.rotate_left(1);
        }
        labels
    }

    /// First day of the month containing `reference`
    pub fn month_start(&self, reference: NaiveDate) -> NaiveDate {
        reference.with_day(1).unwrap_or(reference)
    }

    /// Last day of the month containing `reference`
    pub fn month_end(&self, reference: NaiveDate) -> NaiveDate {
        let last = self.days_in_month(reference.year(), reference.month());
        reference.with_day(last).unwrap_or(reference)
    }

    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        let offset = self.week_start.offset_of(date);
        date.checked_sub_days(chrono::Days::new(offset.into()))
            .unwrap_or(date)
    }

    pub fn end_of_week(&self, date: NaiveDate) -> NaiveDate {
        let offset = 6 - self.week_start.offset_of(date);
        date.checked_add_days(chrono::Days::new(offset.into()))
            .unwrap_or(date)
    }

    /// Whole-week grid for the month containing `reference`.
    ///
    /// Runs from the start of the week holding the 1st to the end of the
    /// week holding the last day, so the length is always a multiple of 7
    /// and adjacent-month days fill the first and last rows.
    pub fn grid_dates(&self, reference: NaiveDate) -> Vec<NaiveDate> {
        let first = self.start_of_week(self.month_start(reference));
        let last = self.end_of_week(self.month_end(reference));

        let mut dates = Vec::with_capacity(42);
        let mut current = first;
        while current <= last {
            dates.push(current);
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        dates
    }

    /// Same day next month, clamped to the last day when it overflows
    pub fn next_month(&self, reference: NaiveDate) -> NaiveDate {
        reference
            .checked_add_months(Months::new(1))
            .unwrap_or(reference)
    }

    /// Same day previous month, clamped to the last day when it overflows
    pub fn previous_month(&self, reference: NaiveDate) -> NaiveDate {
        reference
            .checked_sub_months(Months::new(1))
            .unwrap_or(reference)
    }

    pub fn is_same_month(&self, a: NaiveDate, b: NaiveDate) -> bool {
        a.year() == b.year() && a.month() == b.month()
    }

    /// Build the renderable month view for the month containing `reference`.
    ///
    /// Transactions are keyed by their local date in `tz`; days outside the
    /// month still show their own transactions but do not count towards
    /// the month totals.
    pub fn build_month_view<Tz: TimeZone>(
        &self,
        reference: NaiveDate,
        today: NaiveDate,
        transactions: &[Transaction],
        tz: &Tz,
    ) -> CalendarMonthView {
        let month_start = self.month_start(reference);
        let buckets = group_by_local_date(transactions, tz);

        let days: Vec<CalendarDay> = self
            .grid_dates(reference)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                in_current_month: self.is_same_month(date, month_start),
                is_today: date == today,
                transactions: buckets
                    .transactions_on(date)
                    .iter()
                    .map(|t| (*t).clone())
                    .collect(),
                aggregate: buckets.aggregate_for(date),
            })
            .collect();

        let totals = aggregate(
            days.iter()
                .filter(|day| day.in_current_month)
                .flat_map(|day| day.transactions.iter()),
        );

        log::debug!(
            "built month view for {}: {} cells, {} transactions in month",
            self.month_label(month_start),
            days.len(),
            totals.count
        );

        CalendarMonthView {
            month_start,
            days,
            totals,
        }
    }
}
