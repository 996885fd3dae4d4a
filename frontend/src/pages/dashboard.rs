use chrono::Local;
use finance_tracker_domain::money::{amount_class, format_signed};
use finance_tracker_domain::{format_currency, DashboardSummary};
use yew::prelude::*;

use crate::contexts::AuthContext;
use crate::hooks::use_date_format::use_date_format;
use crate::hooks::use_finance_data::use_finance_data;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub auth: AuthContext,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let data = use_finance_data(&props.auth);
    let formatter = use_date_format();
    let state = &data.state;

    if state.loading && state.transactions.is_empty() {
        return html! { <div class="loading">{ "Loading your finances..." }</div> };
    }

    let summary = DashboardSummary::compute(
        &state.accounts,
        &state.goals,
        &state.transactions,
        date_utils::today(),
        &Local,
    );

    let retry = {
        let refresh = data.actions.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    html! {
        <div class="dashboard">
            { if let Some(error) = &state.error {
                html! {
                    <div class="error-banner">
                        <span>{ error.clone() }</span>
                        <button type="button" onclick={retry}>{ "Retry" }</button>
                    </div>
                }
            } else { html! {} } }

            <section class="stat-cards">
                <div class="stat-card">
                    <span class="stat-label">{ "Total balance" }</span>
                    <span class="stat-value">{ format_currency(summary.total_balance) }</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">{ "Income this month" }</span>
                    <span class="stat-value amount-income">{ format_currency(summary.month.income) }</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">{ "Expenses this month" }</span>
                    <span class="stat-value amount-expense">{ format_currency(summary.month.expense) }</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">{ "Net this month" }</span>
                    <span class="stat-value">{ format_currency(summary.month.net) }</span>
                </div>
            </section>

            <section class="panel accounts">
                <h2>{ "Accounts" }</h2>
                { if state.accounts.is_empty() {
                    html! { <p class="empty">{ "No accounts yet." }</p> }
                } else {
                    html! {
                        <ul>
                            { for state.accounts.iter().map(|account| html! {
                                <li key={account.id.to_string()}>
                                    <span class="account-dot" style={format!("background: {}", account.color)}></span>
                                    <span class="account-name">{ account.name.clone() }</span>
                                    <span class="account-balance">{ format_currency(account.balance) }</span>
                                </li>
                            }) }
                        </ul>
                    }
                } }
            </section>

            <section class="panel goals">
                <h2>{ "Goals" }</h2>
                { if summary.goals.is_empty() {
                    html! { <p class="empty">{ "No goals yet." }</p> }
                } else {
                    html! {
                        <ul>
                            { for summary.goals.iter().map(|goal| html! {
                                <li key={goal.goal_id.to_string()} class={classes!(goal.completed.then_some("completed"))}>
                                    <div class="goal-header">
                                        <span>{ goal.name.clone() }</span>
                                        <span>{ format!("{} / {}", format_currency(goal.current_amount), format_currency(goal.target_amount)) }</span>
                                    </div>
                                    <div class="progress">
                                        <div class="progress-bar" style={format!("width: {}%", goal.percent)}></div>
                                    </div>
                                    <span class="goal-percent">{ format!("{}%", goal.percent) }</span>
                                </li>
                            }) }
                        </ul>
                    }
                } }
            </section>

            <section class="panel recent">
                <h2>{ "Recent transactions" }</h2>
                { if summary.recent.is_empty() {
                    html! { <p class="empty">{ "No transactions yet." }</p> }
                } else {
                    html! {
                        <ul class="transaction-list">
                            { for summary.recent.iter().map(|transaction| html! {
                                <li key={transaction.id.to_string()} class="transaction-item">
                                    <span class="transaction-date">{ formatter.format_timestamp(&transaction.created_at, &Local) }</span>
                                    <span class="transaction-description">{ transaction.description.clone() }</span>
                                    <span class={classes!("transaction-amount", amount_class(transaction.transaction_type))}>
                                        { format_signed(transaction) }
                                    </span>
                                </li>
                            }) }
                        </ul>
                    }
                } }
            </section>
        </div>
    }
}
