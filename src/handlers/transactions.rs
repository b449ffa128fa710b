//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints. All of them sit
//! behind the route guard and act on the caller's own records only:
//! - GET /api/transactions - List with optional type, category and date filters
//! - GET /api/transactions/stats - Income, expense and balance totals
//! - GET /api/transactions/{id} - Get one transaction
//! - POST /api/transactions - Create a transaction
//! - PUT /api/transactions/{id} - Update some fields of a transaction
//! - DELETE /api/transactions/{id} - Delete a transaction

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    middleware::auth::Principal,
    models::transaction::{
        CreateTransactionRequest, DeleteResponse, ListTransactionsQuery, TransactionResponse,
        TransactionStats, UpdateTransactionRequest,
    },
    services::transaction_service,
    state::AppState,
};

/// List the caller's transactions, newest first.
///
/// # Query Parameters
///
/// - `type` - `income` or `expense`
/// - `category` - case-insensitive substring
/// - `startDate` / `endDate` - inclusive bounds on the transaction date
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    query: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let Query(query) = query?;
    let transactions =
        transaction_service::list_transactions(state.transactions.as_ref(), principal.user_id, query)
            .await?;

    let responses: Vec<TransactionResponse> = transactions.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get transaction by ID.
///
/// # Security
///
/// Returns 404 if the transaction doesn't exist or belongs to another user.
pub async fn get_transaction(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<TransactionResponse>, AppError> {
    let id = transaction_service::parse_id(&id)?;
    let transaction =
        transaction_service::get_transaction(state.transactions.as_ref(), principal.user_id, id)
            .await?;

    Ok(Json(transaction.into()))
}

/// Create a transaction owned by the caller.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Salary",
///   "amount": 5000,
///   "type": "income",
///   "category": "Work"
/// }
/// ```
///
/// `date` defaults to now and `description` is optional.
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let transaction = transaction_service::create_transaction(
        state.transactions.as_ref(),
        principal.user_id,
        request,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(transaction)),
    ))
}

/// Update the supplied fields of one of the caller's transactions.
pub async fn update_transaction(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let id = transaction_service::parse_id(&id)?;
    let Json(request) = payload?;
    let transaction = transaction_service::update_transaction(
        state.transactions.as_ref(),
        principal.user_id,
        id,
        request,
    )
    .await?;

    Ok(Json(transaction.into()))
}

/// Permanently delete one of the caller's transactions.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = transaction_service::parse_id(&id)?;
    transaction_service::delete_transaction(state.transactions.as_ref(), principal.user_id, id)
        .await?;

    Ok(Json(DeleteResponse::deleted()))
}

/// Totals for the caller.
///
/// # Response (200 OK)
///
/// ```json
/// { "income": 5000.0, "expense": 1200.0, "balance": 3800.0 }
/// ```
pub async fn transaction_stats(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<TransactionStats>, AppError> {
    let stats =
        transaction_service::transaction_stats(state.transactions.as_ref(), principal.user_id)
            .await?;

    Ok(Json(stats))
}
