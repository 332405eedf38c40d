use crate::error::AppError;
use crate::extract::OptionalSession;
use crate::models::SelectAccountResponse;
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use types::account::Account;

pub async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    Json(state.directory.as_ref().clone())
}

pub async fn select_account(
    State(state): State<AppState>,
    OptionalSession(session): OptionalSession,
    payload: Result<Json<Account>, JsonRejection>,
) -> Result<Json<SelectAccountResponse>, AppError> {
    let Json(account) = payload?;

    let session_id = state.proxy.select_account(session, account)?;

    Ok(Json(SelectAccountResponse {
        session_id,
        message: "User selected successfully".to_string(),
    }))
}
