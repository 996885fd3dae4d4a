use chrono::{Local, NaiveDate};
use finance_tracker_domain::TransactionInput;
use shared::{Account, CreateTransactionRequest, Goal, RecurrenceFrequency, TransactionType};
use uuid::Uuid;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::date_picker::DatePicker;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub accounts: Vec<Account>,
    #[prop_or_default]
    pub goals: Vec<Goal>,
    pub initial_date: NaiveDate,
    pub on_submit: Callback<(CreateTransactionRequest, Callback<Result<(), String>>)>,
    pub on_close: Callback<()>,
}

type Setter = fn(&mut TransactionInput, String);

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let input = {
        let date = props.initial_date;
        let first_account = props.accounts.first().map(|a| a.id);
        use_state(move || TransactionInput {
            account_id: first_account,
            ..TransactionInput::new(date)
        })
    };
    let errors = use_state(Vec::<String>::new);
    let saving = use_state(|| false);

    let on_text = |set: Setter| {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let element: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*input).clone();
            set(&mut next, element.value());
            input.set(next);
        })
    };

    let on_select = |set: Setter| {
        let input = input.clone();
        Callback::from(move |e: Event| {
            let element: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*input).clone();
            set(&mut next, element.value());
            input.set(next);
        })
    };

    let on_recurring = {
        let input = input.clone();
        Callback::from(move |e: Event| {
            let element: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*input).clone();
            next.is_recurring = element.checked();
            if next.is_recurring {
                if next.frequency.is_none() {
                    next.frequency = Some(RecurrenceFrequency::Monthly);
                }
                next.date = next.date.max(date_utils::today());
            }
            input.set(next);
        })
    };

    let on_date = {
        let input = input.clone();
        Callback::from(move |date: NaiveDate| {
            let mut next = (*input).clone();
            next.date = date;
            input.set(next);
        })
    };

    let on_submit = {
        let input = input.clone();
        let errors = errors.clone();
        let saving = saving.clone();
        let on_submit = props.on_submit.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }

            match (*input).clone().into_request(date_utils::now(), &Local) {
                Ok(request) => {
                    errors.set(Vec::new());
                    saving.set(true);
                    let errors = errors.clone();
                    let saving = saving.clone();
                    let on_close = on_close.clone();
                    let on_done = Callback::from(move |result: Result<(), String>| {
                        saving.set(false);
                        match result {
                            Ok(()) => on_close.emit(()),
                            Err(message) => errors.set(vec![message]),
                        }
                    });
                    on_submit.emit((request, on_done));
                }
                Err(problems) => {
                    Logger::debug_with_component("transaction-form", &format!("{} validation errors", problems.len()));
                    errors.set(problems.iter().map(ToString::to_string).collect());
                }
            }
        })
    };

    let cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    // Recurring transactions start today or later
    let min_date = input.is_recurring.then(date_utils::today);

    html! {
        <div class="modal-backdrop">
            <form class="modal transaction-form" onsubmit={on_submit}>
                <h3>{ "New transaction" }</h3>

                { if !errors.is_empty() {
                    html! {
                        <ul class="form-errors">
                            { for errors.iter().map(|e| html! { <li>{ e.clone() }</li> }) }
                        </ul>
                    }
                } else { html! {} } }

                <label>
                    { "Type" }
                    <select onchange={on_select(|input, value| {
                        if let Some(kind) = TransactionType::parse(&value) {
                            input.transaction_type = kind;
                        }
                    })}>
                        { for TransactionType::ALL.iter().map(|kind| html! {
                            <option value={kind.as_str()} selected={*kind == input.transaction_type}>{ kind.to_string() }</option>
                        }) }
                    </select>
                </label>

                <label>
                    { "Amount" }
                    <input
                        type="text"
                        inputmode="decimal"
                        placeholder="0.00"
                        value={input.amount.clone()}
                        oninput={on_text(|input, value| input.amount = value)}
                    />
                </label>

                <label>
                    { "Description" }
                    <input
                        type="text"
                        value={input.description.clone()}
                        oninput={on_text(|input, value| input.description = value)}
                    />
                </label>

                <label>
                    { "Category" }
                    <input
                        type="text"
                        value={input.category.clone()}
                        oninput={on_text(|input, value| input.category = value)}
                    />
                </label>

                <label>
                    { "Account" }
                    <select onchange={on_select(|input, value| input.account_id = Uuid::parse_str(&value).ok())}>
                        <option value="" selected={input.account_id.is_none()}>{ "Choose an account" }</option>
                        { for props.accounts.iter().map(|account| html! {
                            <option value={account.id.to_string()} selected={Some(account.id) == input.account_id}>
                                { account.name.clone() }
                            </option>
                        }) }
                    </select>
                </label>

                { if !props.goals.is_empty() {
                    html! {
                        <label>
                            { "Goal" }
                            <select onchange={on_select(|input, value| input.goal_id = Uuid::parse_str(&value).ok())}>
                                <option value="" selected={input.goal_id.is_none()}>{ "None" }</option>
                                { for props.goals.iter().map(|goal| html! {
                                    <option value={goal.id.to_string()} selected={Some(goal.id) == input.goal_id}>
                                        { goal.name.clone() }
                                    </option>
                                }) }
                            </select>
                        </label>
                    }
                } else { html! {} } }

                <DatePicker label="Date" value={Some(input.date)} on_change={on_date} min_date={min_date} />

                <label class="checkbox">
                    <input type="checkbox" checked={input.is_recurring} onchange={on_recurring} />
                    { "Repeats" }
                </label>

                { if input.is_recurring {
                    html! {
                        <label>
                            { "Frequency" }
                            <select onchange={on_select(|input, value| input.frequency = RecurrenceFrequency::parse(&value))}>
                                { for RecurrenceFrequency::ALL.iter().map(|frequency| html! {
                                    <option value={frequency.as_str()} selected={Some(*frequency) == input.frequency}>
                                        { frequency.to_string() }
                                    </option>
                                }) }
                            </select>
                        </label>
                    }
                } else { html! {} } }

                <div class="form-actions">
                    <button type="button" class="secondary" onclick={cancel}>{ "Cancel" }</button>
                    <button type="submit" disabled={*saving}>{ if *saving { "Saving..." } else { "Save" } }</button>
                </div>
            </form>
        </div>
    }
}
