use crate::error::AppError;
use crate::extract::RequiredSession;
use crate::models::TransactionsQuery;
use crate::proxy::{SearchResults, TransactionPage};
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use types::transaction::SearchQuery;

pub async fn list_transactions(
    State(state): State<AppState>,
    RequiredSession(session): RequiredSession,
    params: Result<Query<TransactionsQuery>, QueryRejection>,
) -> Result<Json<TransactionPage>, AppError> {
    let Query(params) = params?;
    let page = parse_page(params.p.as_deref())?;

    let page = state.proxy.list_transactions(&session, page).await?;
    Ok(Json(page))
}

pub async fn search_transactions(
    State(state): State<AppState>,
    RequiredSession(session): RequiredSession,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<SearchResults>, AppError> {
    let Json(query) = payload?;

    let results = state.proxy.search_transactions(&session, &query).await?;
    Ok(Json(results))
}

/// Empty means "use the default page"
fn parse_page(raw: Option<&str>) -> Result<Option<u32>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(p) => match p.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(AppError::InvalidInput(format!("Invalid page: {}", p))),
        },
    }
}
