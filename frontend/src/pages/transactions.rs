use chrono::{DateTime, NaiveDate, Utc};
use finance_tracker_domain::DeletionPolicy;
use yew::prelude::*;

use crate::components::calendar_view::CalendarView;
use crate::components::transaction_form::TransactionForm;
use crate::contexts::AuthContext;
use crate::hooks::use_finance_data::use_finance_data;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub auth: AuthContext,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let data = use_finance_data(&props.auth);
    let form_date = use_state(|| None::<NaiveDate>);
    let state = &data.state;

    let is_transaction_old = Callback::from(|created_at: DateTime<Utc>| {
        DeletionPolicy::default().is_old(created_at, date_utils::now())
    });

    let open_form = {
        let form_date = form_date.clone();
        Callback::from(move |date: NaiveDate| form_date.set(Some(date)))
    };
    let open_form_today = {
        let open_form = open_form.clone();
        Callback::from(move |_: MouseEvent| open_form.emit(date_utils::today()))
    };
    let close_form = {
        let form_date = form_date.clone();
        Callback::from(move |_: ()| form_date.set(None))
    };

    html! {
        <div class="transactions-page">
            <div class="page-header">
                <h1>{ "Transactions" }</h1>
                <button type="button" class="primary" onclick={open_form_today} disabled={state.accounts.is_empty()}>
                    { "Add transaction" }
                </button>
            </div>

            { if let Some(error) = &state.error {
                html! { <div class="error-banner">{ error.clone() }</div> }
            } else { html! {} } }

            { if state.loading && state.transactions.is_empty() {
                html! { <div class="loading">{ "Loading transactions..." }</div> }
            } else {
                html! {
                    <CalendarView
                        transactions={state.transactions.clone()}
                        accounts={state.accounts.clone()}
                        is_transaction_old={is_transaction_old}
                        on_delete={data.actions.delete_transaction.clone()}
                        on_add={(!state.accounts.is_empty()).then_some(open_form)}
                        deleting={state.deleting}
                    />
                }
            } }

            { if let Some(date) = *form_date {
                html! {
                    <TransactionForm
                        accounts={state.accounts.clone()}
                        goals={state.goals.clone()}
                        initial_date={date}
                        on_submit={data.actions.create_transaction.clone()}
                        on_close={close_form}
                    />
                }
            } else { html! {} } }
        </div>
    }
}
