//! Open/closed state machine behind the date picker control.
//!
//! The picker starts `Closed`. A trigger click opens it on the month of the
//! current value (or today). While open it closes on a selection, a click
//! outside the control, an explicit close, or a second trigger click.
//! Dates before the optional minimum are disabled and clicking them does
//! nothing at all.

use crate::calendar::{CalendarService, WeekStart};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickerVisibility {
    #[default]
    Closed,
    Open,
}

/// User interactions the picker reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePickerEvent {
    TriggerClicked,
    DateClicked(NaiveDate),
    ClickedOutside,
    Close,
    PreviousMonth,
    NextMonth,
}

/// What handling an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePickerOutcome {
    /// Nothing changed
    Ignored,
    /// Visibility or displayed month changed
    Updated,
    /// A date was chosen; the caller should emit it
    Selected(NaiveDate),
}

/// One cell of the picker grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerDay {
    pub date: NaiveDate,
    pub in_displayed_month: bool,
    pub is_selected: bool,
    pub is_today: bool,
    pub is_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerState {
    visibility: PickerVisibility,
    /// Always the first day of a month
    displayed_month: NaiveDate,
    selected: Option<NaiveDate>,
    min_date: Option<NaiveDate>,
    today: NaiveDate,
    week_start: WeekStart,
}

impl DatePickerState {
    pub fn new(selected: Option<NaiveDate>, min_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self::with_calendar(selected, min_date, today, &CalendarService::new())
    }

    pub fn with_calendar(
        selected: Option<NaiveDate>,
        min_date: Option<NaiveDate>,
        today: NaiveDate,
        calendar: &CalendarService,
    ) -> Self {
        let displayed_month = calendar.month_start(selected.unwrap_or(today));
        Self {
            visibility: PickerVisibility::Closed,
            displayed_month,
            selected,
            min_date,
            today,
            week_start: calendar.week_start(),
        }
    }

    fn calendar(&self) -> CalendarService {
        CalendarService::with_week_start(self.week_start)
    }

    pub fn visibility(&self) -> PickerVisibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == PickerVisibility::Open
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_date
    }

    /// Sync the controlled value and minimum coming from the parent
    pub fn set_props(&mut self, selected: Option<NaiveDate>, min_date: Option<NaiveDate>) {
        self.selected = selected;
        self.min_date = min_date;
    }

    /// Strictly before the minimum date
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.min_date.is_some_and(|min| date < min)
    }

    pub fn handle(&mut self, event: DatePickerEvent) -> DatePickerOutcome {
        let calendar = self.calendar();

        match (self.visibility, event) {
            (PickerVisibility::Closed, DatePickerEvent::TriggerClicked) => {
                self.displayed_month = calendar.month_start(self.selected.unwrap_or(self.today));
                self.visibility = PickerVisibility::Open;
                DatePickerOutcome::Updated
            }
            (PickerVisibility::Closed, _) => DatePickerOutcome::Ignored,
            (PickerVisibility::Open, DatePickerEvent::DateClicked(date)) => {
                if self.is_disabled(date) {
                    log::debug!("ignoring click on disabled date {}", date);
                    return DatePickerOutcome::Ignored;
                }
                self.selected = Some(date);
                self.visibility = PickerVisibility::Closed;
                DatePickerOutcome::Selected(date)
            }
            (
                PickerVisibility::Open,
                DatePickerEvent::TriggerClicked
                | DatePickerEvent::ClickedOutside
                | DatePickerEvent::Close,
            ) => {
                self.visibility = PickerVisibility::Closed;
                DatePickerOutcome::Updated
            }
            (PickerVisibility::Open, DatePickerEvent::PreviousMonth) => {
                self.displayed_month = calendar.previous_month(self.displayed_month);
                DatePickerOutcome::Updated
            }
            (PickerVisibility::Open, DatePickerEvent::NextMonth) => {
                self.displayed_month = calendar.next_month(self.displayed_month);
                DatePickerOutcome::Updated
            }
        }
    }

    /// Cells for the displayed month
    pub fn days(&self) -> Vec<PickerDay> {
        let calendar = self.calendar();
        calendar
            .grid_dates(self.displayed_month)
            .into_iter()
            .map(|date| PickerDay {
                date,
                in_displayed_month: calendar.is_same_month(date, self.displayed_month),
                is_selected: self.selected == Some(date),
                is_today: date == self.today,
                is_disabled: self.is_disabled(date),
            })
            .collect()
    }

    pub fn month_label(&self) -> String {
        self.calendar().month_label(self.displayed_month)
    }

    pub fn weekday_labels(&self) -> [&'static str; 7] {
        self.calendar().weekday_labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn open_picker(selected: Option<NaiveDate>, min_date: Option<NaiveDate>) -> DatePickerState {
        let mut picker = DatePickerState::new(selected, min_date, date(2024, 3, 15));
        assert_eq!(picker.handle(DatePickerEvent::TriggerClicked), DatePickerOutcome::Updated);
        picker
    }

    #[test]
    fn test_starts_closed() {
        let picker = DatePickerState::new(None, None, date(2024, 3, 15));
        assert_eq!(picker.visibility(), PickerVisibility::Closed);
        assert_eq!(picker.displayed_month(), date(2024, 3, 1));
    }

    #[test]
    fn test_trigger_opens_on_selected_month() {
        let picker = open_picker(Some(date(2023, 11, 20)), None);
        assert!(picker.is_open());
        assert_eq!(picker.displayed_month(), date(2023, 11, 1));
    }

    #[test]
    fn test_selecting_emits_and_closes() {
        let mut picker = open_picker(None, None);

        let outcome = picker.handle(DatePickerEvent::DateClicked(date(2024, 3, 20)));

        assert_eq!(outcome, DatePickerOutcome::Selected(date(2024, 3, 20)));
        assert!(!picker.is_open());
        assert_eq!(picker.selected(), Some(date(2024, 3, 20)));
    }

    #[test]
    fn test_disabled_date_keeps_picker_open() {
        let mut picker = open_picker(None, Some(date(2024, 3, 10)));

        let outcome = picker.handle(DatePickerEvent::DateClicked(date(2024, 3, 9)));

        assert_eq!(outcome, DatePickerOutcome::Ignored);
        assert!(picker.is_open());
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn test_minimum_date_itself_is_selectable() {
        let mut picker = open_picker(None, Some(date(2024, 3, 10)));

        let outcome = picker.handle(DatePickerEvent::DateClicked(date(2024, 3, 10)));

        assert_eq!(outcome, DatePickerOutcome::Selected(date(2024, 3, 10)));
    }

    #[test]
    fn test_outside_click_and_close_both_close() {
        let mut picker = open_picker(None, None);
        assert_eq!(picker.handle(DatePickerEvent::ClickedOutside), DatePickerOutcome::Updated);
        assert!(!picker.is_open());

        picker.handle(DatePickerEvent::TriggerClicked);
        assert_eq!(picker.handle(DatePickerEvent::Close), DatePickerOutcome::Updated);
        assert!(!picker.is_open());
    }

    #[test]
    fn test_trigger_toggles_closed() {
        let mut picker = open_picker(None, None);
        picker.handle(DatePickerEvent::TriggerClicked);
        assert!(!picker.is_open());
    }

    #[test]
    fn test_events_while_closed_are_ignored() {
        let mut picker = DatePickerState::new(None, None, date(2024, 3, 15));

        for event in [
            DatePickerEvent::DateClicked(date(2024, 3, 1)),
            DatePickerEvent::ClickedOutside,
            DatePickerEvent::Close,
            DatePickerEvent::NextMonth,
            DatePickerEvent::PreviousMonth,
        ] {
            assert_eq!(picker.handle(event), DatePickerOutcome::Ignored);
        }
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.displayed_month(), date(2024, 3, 1));
    }

    #[test]
    fn test_navigation_ignores_minimum_date() {
        let mut picker = open_picker(None, Some(date(2024, 3, 10)));

        picker.handle(DatePickerEvent::PreviousMonth);
        picker.handle(DatePickerEvent::PreviousMonth);

        assert_eq!(picker.displayed_month(), date(2024, 1, 1));
        assert!(picker.is_open());
        assert!(picker.days().iter().all(|d| d.is_disabled));

        picker.handle(DatePickerEvent::NextMonth);
        assert_eq!(picker.displayed_month(), date(2024, 2, 1));
    }

    #[test]
    fn test_reopening_returns_to_selected_month() {
        let mut picker = open_picker(Some(date(2024, 3, 2)), None);
        picker.handle(DatePickerEvent::NextMonth);
        picker.handle(DatePickerEvent::Close);

        picker.handle(DatePickerEvent::TriggerClicked);
        assert_eq!(picker.displayed_month(), date(2024, 3, 1));
    }

    #[test]
    fn test_days_flags() {
        let picker = open_picker(Some(date(2024, 3, 20)), Some(date(2024, 3, 10)));
        let days = picker.days();

        assert_eq!(days.len() % 7, 0);

        let selected: Vec<_> = days.iter().filter(|d| d.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2024, 3, 20));

        let today = days.iter().find(|d| d.is_today).unwrap();
        assert_eq!(today.date, date(2024, 3, 15));

        let ninth = days.iter().find(|d| d.date == date(2024, 3, 9)).unwrap();
        assert!(ninth.is_disabled);
        let tenth = days.iter().find(|d| d.date == date(2024, 3, 10)).unwrap();
        assert!(!tenth.is_disabled);

        let leading = days.iter().find(|d| d.date == date(2024, 2, 25)).unwrap();
        assert!(!leading.in_displayed_month);
    }

    #[test]
    fn test_monday_week_start_labels() {
        let picker = DatePickerState::with_calendar(
            None,
            None,
            date(2024, 3, 15),
            &CalendarService::with_week_start(WeekStart::Monday),
        );
        assert_eq!(picker.weekday_labels()[0], "Mon");
        assert_eq!(picker.month_label(), "March 2024");
    }
}
