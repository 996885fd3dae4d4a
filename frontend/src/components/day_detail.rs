use chrono::{DateTime, Local, Utc};
use finance_tracker_domain::money::{amount_class, format_signed};
use finance_tracker_domain::format_currency;
use shared::{Account, CalendarDay, Transaction};
use uuid::Uuid;
use yew::prelude::*;

use crate::hooks::use_date_format::use_date_format;

#[derive(Properties, PartialEq)]
pub struct DayDetailProps {
    pub day: CalendarDay,
    pub accounts: Vec<Account>,
    pub is_transaction_old: Callback<DateTime<Utc>, bool>,
    pub on_delete: Callback<Transaction>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub deleting: Option<Uuid>,
}

/// Modal listing one day's transactions. Delete is offered only for
/// transactions still inside the deletion window.
#[function_component(DayDetail)]
pub fn day_detail(props: &DayDetailProps) -> Html {
    let formatter = use_date_format();

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    let account_for = |id: Uuid| props.accounts.iter().find(|a| a.id == id);

    html! {
        <div class="modal-backdrop" onclick={close.clone()}>
            <div class="modal day-detail" onclick={keep_open}>
                <div class="modal-header">
                    <h3>{ formatter.format_long(props.day.date) }</h3>
                    <button type="button" class="close-button" onclick={close}>{ "×" }</button>
                </div>

                <div class="day-detail-totals">
                    <span class="amount-income">{ format!("Income {}", format_currency(props.day.aggregate.income)) }</span>
                    <span class="amount-expense">{ format!("Expenses {}", format_currency(props.day.aggregate.expense)) }</span>
                    <span class="net">{ format!("Net {}", format_currency(props.day.aggregate.net)) }</span>
                </div>

                <ul class="transaction-list">
                    { for props.day.transactions.iter().map(|transaction| {
                        let is_old = props.is_transaction_old.emit(transaction.created_at);
                        let is_deleting = props.deleting == Some(transaction.id);
                        let account = account_for(transaction.account_id);
                        let on_delete = {
                            let on_delete = props.on_delete.clone();
                            let transaction = transaction.clone();
                            Callback::from(move |_: MouseEvent| on_delete.emit(transaction.clone()))
                        };

                        html! {
                            <li class="transaction-item" key={transaction.id.to_string()}>
                                <div class="transaction-main">
                                    <span class="transaction-description">{ transaction.description.clone() }</span>
                                    { if !transaction.category.is_empty() {
                                        html! { <span class="transaction-category">{ transaction.category.clone() }</span> }
                                    } else { html! {} } }
                                    { if let Some(account) = account {
                                        html! {
                                            <span class="account-chip" style={format!("border-color: {}", account.color)}>
                                                { account.name.clone() }
                                            </span>
                                        }
                                    } else { html! {} } }
                                    { if transaction.is_recurring {
                                        html! { <span class="recurring-badge">{ transaction.recurrence_frequency.map(|f| f.to_string()).unwrap_or_else(|| "recurring".to_string()) }</span> }
                                    } else { html! {} } }
                                </div>
                                <div class="transaction-side">
                                    <span class={classes!("transaction-amount", amount_class(transaction.transaction_type))}>
                                        { format_signed(transaction) }
                                    </span>
                                    <span class="transaction-time">
                                        { transaction.created_at.with_timezone(&Local).format("%-I:%M %p").to_string() }
                                    </span>
                                    { if !is_old {
                                        html! {
                                            <button
                                                type="button"
                                                class="delete-button"
                                                onclick={on_delete}
                                                disabled={is_deleting}
                                            >
                                                { if is_deleting { "Deleting..." } else { "Delete" } }
                                            </button>
                                        }
                                    } else { html! {} } }
                                </div>
                            </li>
                        }
                    }) }
                </ul>
            </div>
        </div>
    }
}
