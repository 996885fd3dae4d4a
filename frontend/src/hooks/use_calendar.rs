use chrono::NaiveDate;
use finance_tracker_domain::CalendarService;
use yew::prelude::*;

use crate::services::date_utils;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    /// Any date inside the displayed month
    pub reference: NaiveDate,
    pub today: NaiveDate,
    pub selected_day: Option<NaiveDate>,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub go_to_today: Callback<MouseEvent>,
    pub select_day: Callback<NaiveDate>,
    pub clear_selection: Callback<()>,
}

/// Month navigation and day selection for the transaction calendar
#[hook]
pub fn use_calendar() -> UseCalendarResult {
    let today = date_utils::today();
    let reference = use_state(move || today);
    let selected_day = use_state(|| Option::<NaiveDate>::None);

    let prev_month = {
        let reference = reference.clone();
        use_callback(*reference, move |_: MouseEvent, current| {
            reference.set(CalendarService::new().previous_month(*current));
        })
    };

    let next_month = {
        let reference = reference.clone();
        use_callback(*reference, move |_: MouseEvent, current| {
            reference.set(CalendarService::new().next_month(*current));
        })
    };

    let go_to_today = {
        let reference = reference.clone();
        use_callback((), move |_: MouseEvent, _| {
            reference.set(date_utils::today());
        })
    };

    let select_day = {
        let selected_day = selected_day.clone();
        use_callback((), move |day: NaiveDate, _| {
            selected_day.set(Some(day));
        })
    };

    let clear_selection = {
        let selected_day = selected_day.clone();
        use_callback((), move |_: (), _| {
            selected_day.set(None);
        })
    };

    let state = CalendarState {
        reference: *reference,
        today,
        selected_day: *selected_day,
    };

    let actions = UseCalendarActions {
        prev_month,
        next_month,
        go_to_today,
        select_day,
        clear_selection,
    };

    UseCalendarResult { state, actions }
}
