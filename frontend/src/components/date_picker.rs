use std::rc::Rc;

use chrono::NaiveDate;
use finance_tracker_domain::{DatePickerEvent, DatePickerOutcome, DatePickerState};
use yew::prelude::*;

use crate::hooks::use_click_outside::use_click_outside;
use crate::hooks::use_date_format::use_date_format;
use crate::services::date_utils;

/// Picker state driven by `use_reducer` so the document listener always
/// acts on the latest state
#[derive(Clone, PartialEq)]
struct PickerModel(DatePickerState);

enum PickerAction {
    Event(DatePickerEvent),
    Sync {
        selected: Option<NaiveDate>,
        min_date: Option<NaiveDate>,
    },
}

impl Reducible for PickerModel {
    type Action = PickerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            PickerAction::Event(event) => {
                if state.handle(event) == DatePickerOutcome::Ignored {
                    return self;
                }
            }
            PickerAction::Sync { selected, min_date } => state.set_props(selected, min_date),
        }
        Rc::new(PickerModel(state))
    }
}

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    /// Current value; `None` shows the placeholder
    pub value: Option<NaiveDate>,
    pub on_change: Callback<NaiveDate>,
    /// Dates strictly before this are disabled
    #[prop_or_default]
    pub min_date: Option<NaiveDate>,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or(AttrValue::from("Pick a date"))]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let formatter = use_date_format();
    let picker_ref = use_node_ref();
    let picker = {
        let (value, min_date) = (props.value, props.min_date);
        use_reducer(move || PickerModel(DatePickerState::new(value, min_date, date_utils::today())))
    };

    // Keep the controlled value and minimum in sync with the parent
    {
        let picker = picker.dispatcher();
        use_effect_with((props.value, props.min_date), move |(selected, min_date)| {
            picker.dispatch(PickerAction::Sync {
                selected: *selected,
                min_date: *min_date,
            });
            || ()
        });
    }

    // Disabling closes the dropdown so it does not come back when re-enabled
    {
        let picker = picker.dispatcher();
        use_effect_with(props.disabled, move |disabled| {
            if *disabled {
                picker.dispatch(PickerAction::Event(DatePickerEvent::Close));
            }
            || ()
        });
    }

    let is_open = picker.0.is_open() && !props.disabled;

    {
        let dispatcher = picker.dispatcher();
        let on_outside = Callback::from(move |_| {
            dispatcher.dispatch(PickerAction::Event(DatePickerEvent::ClickedOutside));
        });
        use_click_outside(picker_ref.clone(), is_open, on_outside);
    }

    let send = |event: DatePickerEvent| {
        let dispatcher = picker.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(PickerAction::Event(event)))
    };

    let on_day_click = {
        let picker = picker.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |date: NaiveDate| {
            let mut preview = picker.0.clone();
            if let DatePickerOutcome::Selected(date) = preview.handle(DatePickerEvent::DateClicked(date)) {
                on_change.emit(date);
            }
            picker.dispatch(PickerAction::Event(DatePickerEvent::DateClicked(date)));
        })
    };

    let display_text = match props.value {
        Some(date) => formatter.format_date(date),
        None => props.placeholder.to_string(),
    };

    html! {
        <div class="date-picker" ref={picker_ref}>
            { if let Some(label) = &props.label {
                html! { <label class="date-picker-label">{ label.clone() }</label> }
            } else { html! {} } }

            <button
                type="button"
                class={classes!("date-display-button", props.value.is_none().then_some("placeholder"))}
                onclick={send(DatePickerEvent::TriggerClicked)}
                disabled={props.disabled}
                aria-expanded={is_open.to_string()}
            >
                <span class="date-text">{ display_text }</span>
                <span class="calendar-icon">{ "📅" }</span>
            </button>

            { if is_open {
                html! {
                    <div class="calendar-dropdown" role="dialog">
                        <div class="calendar-header">
                            <button type="button" class="nav-button" onclick={send(DatePickerEvent::PreviousMonth)}>{ "‹" }</button>
                            <span class="month-year">{ picker.0.month_label() }</span>
                            <button type="button" class="nav-button" onclick={send(DatePickerEvent::NextMonth)}>{ "›" }</button>
                        </div>

                        <div class="calendar-grid">
                            <div class="weekday-header">
                                { for picker.0.weekday_labels().iter().map(|label| html! { <span>{ *label }</span> }) }
                            </div>
                            <div class="calendar-days">
                                { for picker.0.days().into_iter().map(|day| {
                                    let onclick = {
                                        let on_day_click = on_day_click.clone();
                                        Callback::from(move |_: MouseEvent| on_day_click.emit(day.date))
                                    };
                                    let class = classes!(
                                        "calendar-day",
                                        (!day.in_displayed_month).then_some("other-month"),
                                        day.is_selected.then_some("selected"),
                                        day.is_today.then_some("today"),
                                        day.is_disabled.then_some("disabled"),
                                    );
                                    html! {
                                        <button type="button" {class} {onclick} disabled={day.is_disabled}>
                                            { day.date.format("%-d").to_string() }
                                        </button>
                                    }
                                }) }
                            </div>
                        </div>

                        <div class="calendar-footer">
                            <button type="button" class="close-button" onclick={send(DatePickerEvent::Close)}>{ "Close" }</button>
                        </div>
                    </div>
                }
            } else { html! {} } }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn model() -> Rc<PickerModel> {
        let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        Rc::new(PickerModel(DatePickerState::new(None, None, today)))
    }

    #[wasm_bindgen_test]
    fn test_close_stays_closed_until_reopened() {
        let open = model().reduce(PickerAction::Event(DatePickerEvent::TriggerClicked));
        assert!(open.0.is_open());

        let closed = open.reduce(PickerAction::Event(DatePickerEvent::Close));
        assert!(!closed.0.is_open());

        // Syncing props after re-enabling does not reopen it
        let synced = closed.reduce(PickerAction::Sync {
            selected: None,
            min_date: None,
        });
        assert!(!synced.0.is_open());
    }
}
