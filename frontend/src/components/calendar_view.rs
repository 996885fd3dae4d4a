use chrono::{DateTime, Local, NaiveDate, Utc};
use finance_tracker_domain::{format_currency, CalendarService};
use shared::{Account, CalendarDay, CalendarMonthView, Transaction};
use uuid::Uuid;
use yew::prelude::*;

use crate::components::day_detail::DayDetail;
use crate::hooks::use_calendar::use_calendar;
use crate::hooks::use_date_format::use_date_format;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct CalendarViewProps {
    pub transactions: Vec<Transaction>,
    #[prop_or_default]
    pub accounts: Vec<Account>,
    /// Whether a transaction created at this instant is past the deletion window
    pub is_transaction_old: Callback<DateTime<Utc>, bool>,
    pub on_delete: Callback<Transaction>,
    /// Start a new transaction on the given day
    #[prop_or_default]
    pub on_add: Option<Callback<NaiveDate>>,
    #[prop_or_default]
    pub deleting: Option<Uuid>,
}

/// The selected day, while it is in view and still has transactions
fn open_day(view: &CalendarMonthView, selected: Option<NaiveDate>) -> Option<CalendarDay> {
    let date = selected?;
    view.days
        .iter()
        .find(|day| day.date == date)
        .filter(|day| day.is_selectable())
        .cloned()
}

/// Month grid of days with per-day totals. Clicking a day that has
/// transactions opens its detail view; other days do nothing.
#[function_component(CalendarView)]
pub fn calendar_view(props: &CalendarViewProps) -> Html {
    let calendar = use_calendar();
    let formatter = use_date_format();
    let service = CalendarService::new();

    // Rebuilt on every render from the current props
    let view = service.build_month_view(
        calendar.state.reference,
        calendar.state.today,
        &props.transactions,
        &Local,
    );

    let selected = open_day(&view, calendar.state.selected_day);

    // Drop a selection whose day emptied out so it does not reopen later
    let stale_selection = calendar.state.selected_day.is_some() && selected.is_none();
    {
        let clear_selection = calendar.actions.clear_selection.clone();
        use_effect_with(stale_selection, move |stale| {
            if *stale {
                clear_selection.emit(());
            }
            || ()
        });
    }

    let on_day_click = {
        let select_day = calendar.actions.select_day.clone();
        Callback::from(move |day: CalendarDay| {
            if day.is_selectable() {
                Logger::debug_with_component("calendar", &format!("Opening {}", day.date));
                select_day.emit(day.date);
            }
        })
    };

    html! {
        <div class="calendar-view">
            <div class="calendar-header">
                <button type="button" class="nav-button" onclick={calendar.actions.prev_month.clone()}>{ "‹" }</button>
                <h2 class="month-year">{ service.month_label(view.month_start) }</h2>
                <button type="button" class="nav-button" onclick={calendar.actions.next_month.clone()}>{ "›" }</button>
                <button type="button" class="today-button" onclick={calendar.actions.go_to_today.clone()}>{ "Today" }</button>
            </div>

            <div class="calendar-month-totals">
                <span class="amount-income">{ format!("Income {}", format_currency(view.totals.income)) }</span>
                <span class="amount-expense">{ format!("Expenses {}", format_currency(view.totals.expense)) }</span>
                <span class="net">{ format!("Net {}", format_currency(view.totals.net)) }</span>
            </div>

            <div class="calendar-grid">
                { for service.weekday_labels().iter().map(|label| html! {
                    <div class="calendar-weekday">{ *label }</div>
                }) }

                { for view.days.iter().map(|day| {
                    let onclick = {
                        let on_day_click = on_day_click.clone();
                        let day = day.clone();
                        Callback::from(move |_: MouseEvent| on_day_click.emit(day.clone()))
                    };
                    let class = classes!(
                        "calendar-day",
                        (!day.in_current_month).then_some("other-month"),
                        day.is_today.then_some("today"),
                        day.is_selectable().then_some("has-transactions"),
                    );
                    html! {
                        <div {class} {onclick} title={formatter.format_long(day.date)}>
                            <div class="day-number">{ day.date.format("%-d").to_string() }</div>
                            { if day.is_selectable() {
                                html! {
                                    <div class="day-summary">
                                        { if !day.aggregate.income.is_zero() {
                                            html! { <div class="amount-income">{ format!("+{}", format_currency(day.aggregate.income)) }</div> }
                                        } else { html! {} } }
                                        { if !day.aggregate.expense.is_zero() {
                                            html! { <div class="amount-expense">{ format!("-{}", format_currency(day.aggregate.expense)) }</div> }
                                        } else { html! {} } }
                                        <div class="day-count">{ format!("{} txn", day.aggregate.count) }</div>
                                    </div>
                                }
                            } else { html! {} } }
                            { if let (Some(on_add), true) = (props.on_add.as_ref(), day.in_current_month) {
                                let on_add = on_add.clone();
                                let date = day.date;
                                let onclick = Callback::from(move |e: MouseEvent| {
                                    e.stop_propagation();
                                    on_add.emit(date);
                                });
                                html! { <button type="button" class="add-on-day" {onclick} title="Add transaction">{ "+" }</button> }
                            } else { html! {} } }
                        </div>
                    }
                }) }
            </div>

            { if let Some(day) = selected {
                html! {
                    <DayDetail
                        day={day}
                        accounts={props.accounts.clone()}
                        is_transaction_old={props.is_transaction_old.clone()}
                        on_delete={props.on_delete.clone()}
                        on_close={calendar.actions.clear_selection.clone()}
                        deleting={props.deleting}
                    />
                }
            } else { html! {} } }
        </div>
    }
}
