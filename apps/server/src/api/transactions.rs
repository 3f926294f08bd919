use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{NewTransaction, Transaction},
};

#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    responses((status = 200, description = "Ledger rows, newest first", body = [Transaction]))
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transaction_service.get_transactions()?;
    Ok(Json(transactions.into_iter().map(Transaction::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = NewTransaction,
    responses(
        (status = 201, description = "Stored row", body = Transaction),
        (status = 400, description = "Rejected input")
    )
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(new_transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let stored = state
        .transaction_service
        .create_transaction(new_transaction.into())
        .await?;
    Ok((StatusCode::CREATED, Json(stored.into())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/transactions",
        get(list_transactions).post(create_transaction),
    )
}
