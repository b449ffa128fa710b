//! Registration and login HTTP handlers.
//!
//! This module implements the public auth endpoints:
//! - POST /api/auth/register - Create an account and get a token
//! - POST /api/auth/login - Exchange credentials for a token

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::user::{AuthResponse, LoginRequest, RegisterRequest},
    services::auth_service,
    state::AppState,
};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "password": "correct horse",
///   "passwordConfirm": "correct horse"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{ "status": "success", "token": "...", "user": {...} }`
/// - **Error (400)**: Missing field, mismatched passwords or email already registered
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let (token, user) = auth_service::register(state.users.as_ref(), &state.tokens, request).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::success(token, user))))
}

/// Log in with email and password.
///
/// # Response
///
/// - **Success (200 OK)**: `{ "status": "success", "token": "...", "user": {...} }`
/// - **Error (400)**: Email or password missing
/// - **Error (401)**: Incorrect email or password
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(request) = payload?;
    let (token, user) = auth_service::login(state.users.as_ref(), &state.tokens, request).await?;

    Ok(Json(AuthResponse::success(token, user)))
}
