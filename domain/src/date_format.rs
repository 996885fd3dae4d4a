//! Date display formatting driven by the user's profile preference.
//!
//! The profile stores one of three literal patterns. A missing or unknown
//! pattern falls back to `MM/dd/yyyy`. Formatting never fails: input that
//! cannot be read as a date renders as an empty string.

use crate::calendar::CalendarService;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use shared::Profile;
use std::fmt;

/// Supported display patterns, stored by their literal pattern text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormatPreference {
    #[default]
    #[serde(rename = "MM/dd/yyyy")]
    MonthDayYear,
    #[serde(rename = "dd/MM/yyyy")]
    DayMonthYear,
    #[serde(rename = "yyyy-MM-dd")]
    YearMonthDay,
}

impl DateFormatPreference {
    pub const ALL: [DateFormatPreference; 3] = [
        DateFormatPreference::MonthDayYear,
        DateFormatPreference::DayMonthYear,
        DateFormatPreference::YearMonthDay,
    ];

    /// Pattern text as stored in the profile
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormatPreference::MonthDayYear => "MM/dd/yyyy",
            DateFormatPreference::DayMonthYear => "dd/MM/yyyy",
            DateFormatPreference::YearMonthDay => "yyyy-MM-dd",
        }
    }

    fn strftime(&self) -> &'static str {
        match self {
            DateFormatPreference::MonthDayYear => "%m/%d/%Y",
            DateFormatPreference::DayMonthYear => "%d/%m/%Y",
            DateFormatPreference::YearMonthDay => "%Y-%m-%d",
        }
    }

    pub fn from_pattern(pattern: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.pattern() == pattern.trim())
    }

    /// Preference stored on the profile, or the fallback pattern
    pub fn from_profile(profile: Option<&Profile>) -> Self {
        profile
            .and_then(|p| p.date_format.as_deref())
            .and_then(Self::from_pattern)
            .unwrap_or_default()
    }
}

impl fmt::Display for DateFormatPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Formats dates for display using one preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFormatter {
    preference: DateFormatPreference,
}

impl DateFormatter {
    pub fn new(preference: DateFormatPreference) -> Self {
        Self { preference }
    }

    pub fn from_profile(profile: Option<&Profile>) -> Self {
        Self::new(DateFormatPreference::from_profile(profile))
    }

    pub fn preference(&self) -> DateFormatPreference {
        self.preference
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.preference.strftime()).to_string()
    }

    /// Format the local date of a UTC timestamp
    pub fn format_timestamp<Tz: TimeZone>(&self, timestamp: &DateTime<Utc>, tz: &Tz) -> String {
        self.format_date(timestamp.with_timezone(tz).date_naive())
    }

    /// Format a date string coming from the backend or a form field.
    ///
    /// Accepts RFC 3339 timestamps (shown on their local date) and plain
    /// `YYYY-MM-DD` dates. Anything else yields an empty string.
    pub fn format_str<Tz: TimeZone>(&self, input: &str, tz: &Tz) -> String {
        let input = input.trim();

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
            return self.format_timestamp(&timestamp.with_timezone(&Utc), tz);
        }
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return self.format_date(date);
        }

        log::warn!("could not format date input '{}'", input);
        String::new()
    }

    /// Long form used in headings, e.g. "March 5, 2024"
    pub fn format_long(&self, date: NaiveDate) -> String {
        let calendar = CalendarService::new();
        format!("{} {}, {}", calendar.month_name(date.month()), date.day(), date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, utc};
    use chrono::FixedOffset;
    use uuid::Uuid;

    fn profile(date_format: Option<&str>) -> Profile {
        Profile {
            id: Uuid::nil(),
            full_name: Some("Sam".to_string()),
            date_format: date_format.map(str::to_string),
        }
    }

    #[test]
    fn test_patterns() {
        let day = date(2024, 3, 5);

        assert_eq!(DateFormatter::new(DateFormatPreference::MonthDayYear).format_date(day), "03/05/2024");
        assert_eq!(DateFormatter::new(DateFormatPreference::DayMonthYear).format_date(day), "05/03/2024");
        assert_eq!(DateFormatter::new(DateFormatPreference::YearMonthDay).format_date(day), "2024-03-05");
    }

    #[test]
    fn test_preference_from_profile() {
        assert_eq!(
            DateFormatPreference::from_profile(Some(&profile(Some("dd/MM/yyyy")))),
            DateFormatPreference::DayMonthYear
        );
        assert_eq!(
            DateFormatPreference::from_profile(Some(&profile(Some("yyyy-MM-dd")))),
            DateFormatPreference::YearMonthDay
        );
    }

    #[test]
    fn test_missing_preference_falls_back() {
        assert_eq!(DateFormatPreference::from_profile(None), DateFormatPreference::MonthDayYear);
        assert_eq!(
            DateFormatPreference::from_profile(Some(&profile(None))),
            DateFormatPreference::MonthDayYear
        );
        assert_eq!(
            DateFormatPreference::from_profile(Some(&profile(Some("d.M.yy")))),
            DateFormatPreference::MonthDayYear
        );
    }

    #[test]
    fn test_pattern_serde_uses_literal_text() {
        let json = serde_json::to_string(&DateFormatPreference::DayMonthYear).unwrap();
        assert_eq!(json, "\"dd/MM/yyyy\"");

        let parsed: DateFormatPreference = serde_json::from_str("\"yyyy-MM-dd\"").unwrap();
        assert_eq!(parsed, DateFormatPreference::YearMonthDay);
    }

    #[test]
    fn test_format_str_accepts_timestamps_and_dates() {
        let formatter = DateFormatter::new(DateFormatPreference::YearMonthDay);
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();

        assert_eq!(formatter.format_str("2024-03-06T03:00:00Z", &Utc), "2024-03-06");
        // Early morning UTC is still the previous evening in UTC-8
        assert_eq!(formatter.format_str("2024-03-06T03:00:00Z", &pacific), "2024-03-05");
        assert_eq!(formatter.format_str("2024-03-06", &pacific), "2024-03-06");
    }

    #[test]
    fn test_invalid_input_formats_to_empty() {
        let formatter = DateFormatter::default();

        assert_eq!(formatter.format_str("", &Utc), "");
        assert_eq!(formatter.format_str("not a date", &Utc), "");
        assert_eq!(formatter.format_str("2024-02-30", &Utc), "");
        assert_eq!(formatter.format_str("2024-13-01T00:00:00Z", &Utc), "");
    }

    #[test]
    fn test_format_timestamp_and_long_form() {
        let formatter = DateFormatter::default();

        assert_eq!(formatter.format_timestamp(&utc(2024, 12, 31, 23, 0), &Utc), "12/31/2024");
        assert_eq!(formatter.format_long(date(2024, 3, 5)), "March 5, 2024");
    }
}
