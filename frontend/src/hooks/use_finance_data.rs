use std::rc::Rc;

use shared::{Account, CreateTransactionRequest, Goal, Transaction};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::contexts::AuthContext;
use crate::services::api::ApiError;
use crate::services::logging::Logger;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinanceData {
    pub transactions: Vec<Transaction>,
    pub accounts: Vec<Account>,
    pub goals: Vec<Goal>,
    pub loading: bool,
    pub error: Option<String>,
    /// Transaction with a delete request in flight
    pub deleting: Option<Uuid>,
}

pub enum FinanceAction {
    Loading,
    Loaded {
        transactions: Vec<Transaction>,
        accounts: Vec<Account>,
        goals: Vec<Goal>,
    },
    Failed(String),
    Deleting(Uuid),
    Deleted(Uuid),
    DeleteFailed(String),
    Added(Transaction),
}

impl Reducible for FinanceData {
    type Action = FinanceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FinanceAction::Loading => {
                next.loading = true;
                next.error = None;
            }
            FinanceAction::Loaded {
                transactions,
                accounts,
                goals,
            } => {
                next.transactions = transactions;
                next.accounts = accounts;
                next.goals = goals;
                next.loading = false;
            }
            FinanceAction::Failed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
            FinanceAction::Deleting(id) => {
                next.deleting = Some(id);
                next.error = None;
            }
            FinanceAction::Deleted(id) => {
                next.transactions.retain(|t| t.id != id);
                next.deleting = None;
            }
            FinanceAction::DeleteFailed(message) => {
                next.deleting = None;
                next.error = Some(message);
            }
            FinanceAction::Added(transaction) => {
                next.transactions.insert(0, transaction);
            }
        }
        Rc::new(next)
    }
}

pub struct UseFinanceDataResult {
    pub state: FinanceData,
    pub actions: UseFinanceDataActions,
}

#[derive(Clone)]
pub struct UseFinanceDataActions {
    pub refresh: Callback<()>,
    pub delete_transaction: Callback<Transaction>,
    /// Request plus a completion callback receiving the error message on failure
    pub create_transaction: Callback<(CreateTransactionRequest, Callback<Result<(), String>>)>,
}

fn handle_api_error(auth: &AuthContext, context: &str, error: &ApiError) -> String {
    Logger::error_with_component("finance-data", &format!("{}: {}", context, error));
    if error.is_unauthorized() {
        auth.expire();
    }
    error.user_message()
}

/// Transactions, accounts and goals for the signed-in user
#[hook]
pub fn use_finance_data(auth: &AuthContext) -> UseFinanceDataResult {
    let data = use_reducer(|| FinanceData {
        loading: true,
        ..Default::default()
    });

    let refresh = {
        let data = data.clone();
        use_callback(auth.clone(), move |_: (), auth| {
            let Some(token) = auth.access_token() else {
                return;
            };
            let auth = auth.clone();
            let data = data.clone();
            data.dispatch(FinanceAction::Loading);

            spawn_local(async move {
                let api = auth.api();
                let result = async {
                    let transactions = api.get_transactions(&token).await?;
                    let accounts = api.get_accounts(&token).await?;
                    let goals = api.get_goals(&token).await?;
                    Ok::<_, ApiError>((transactions, accounts, goals))
                }
                .await;

                match result {
                    Ok((transactions, accounts, goals)) => {
                        Logger::debug_with_component(
                            "finance-data",
                            &format!("Loaded {} transactions", transactions.len()),
                        );
                        data.dispatch(FinanceAction::Loaded {
                            transactions,
                            accounts,
                            goals,
                        });
                    }
                    Err(e) => {
                        let message = handle_api_error(&auth, "Failed to load data", &e);
                        data.dispatch(FinanceAction::Failed(message));
                    }
                }
            });
        })
    };

    let delete_transaction = {
        let data = data.clone();
        use_callback(auth.clone(), move |transaction: Transaction, auth| {
            let Some(token) = auth.access_token() else {
                return;
            };
            let auth = auth.clone();
            let data = data.clone();
            data.dispatch(FinanceAction::Deleting(transaction.id));

            spawn_local(async move {
                match auth.api().delete_transaction(&token, transaction.id).await {
                    Ok(()) => {
                        Logger::info_with_component("finance-data", &format!("Deleted transaction {}", transaction.id));
                        data.dispatch(FinanceAction::Deleted(transaction.id));
                    }
                    Err(e) => {
                        let message = handle_api_error(&auth, "Failed to delete transaction", &e);
                        data.dispatch(FinanceAction::DeleteFailed(message));
                    }
                }
            });
        })
    };

    let create_transaction = {
        let data = data.clone();
        use_callback(
            auth.clone(),
            move |(request, on_done): (CreateTransactionRequest, Callback<Result<(), String>>), auth| {
                let Some(token) = auth.access_token() else {
                    on_done.emit(Err("You are signed out".to_string()));
                    return;
                };
                let auth = auth.clone();
                let data = data.clone();

                spawn_local(async move {
                    match auth.api().create_transaction(&token, &request).await {
                        Ok(transaction) => {
                            data.dispatch(FinanceAction::Added(transaction));
                            on_done.emit(Ok(()));
                        }
                        Err(e) => {
                            let message = handle_api_error(&auth, "Failed to create transaction", &e);
                            on_done.emit(Err(message));
                        }
                    }
                });
            },
        )
    };

    // Initial load
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let actions = UseFinanceDataActions {
        refresh,
        delete_transaction,
        create_transaction,
    };

    UseFinanceDataResult {
        state: (*data).clone(),
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::TransactionType;
    use wasm_bindgen_test::*;

    fn transaction(description: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            goal_id: None,
            amount: Decimal::new(1250, 2),
            transaction_type: TransactionType::Expense,
            description: description.to_string(),
            category: String::new(),
            is_recurring: false,
            recurrence_frequency: None,
            created_at: Utc::now(),
        }
    }

    #[wasm_bindgen_test]
    fn test_delete_flow_removes_only_target() {
        let keep = transaction("keep");
        let remove = transaction("remove");
        let data = Rc::new(FinanceData::default()).reduce(FinanceAction::Loaded {
            transactions: vec![keep.clone(), remove.clone()],
            accounts: vec![],
            goals: vec![],
        });

        let data = data.reduce(FinanceAction::Deleting(remove.id));
        assert_eq!(data.deleting, Some(remove.id));

        let data = data.reduce(FinanceAction::Deleted(remove.id));
        assert_eq!(data.transactions, vec![keep]);
        assert_eq!(data.deleting, None);
    }

    #[wasm_bindgen_test]
    fn test_failures_surface_message() {
        let data = Rc::new(FinanceData::default()).reduce(FinanceAction::Loading);
        assert!(data.loading);

        let data = data.reduce(FinanceAction::Failed("offline".to_string()));
        assert!(!data.loading);
        assert_eq!(data.error.as_deref(), Some("offline"));

        let added = data.reduce(FinanceAction::Added(transaction("new")));
        assert_eq!(added.transactions.len(), 1);
    }
}
