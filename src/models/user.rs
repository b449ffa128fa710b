//! User data models and auth request/response types.
//!
//! This module defines:
//! - `User`: Database entity, including the password digest
//! - `RegisterRequest` / `LoginRequest`: Request bodies for the auth endpoints
//! - `UserResponse` / `AuthResponse`: What clients get back (never the digest)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. `email` is unique and stored lower-cased.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique identifier for this user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Lower-cased, trimmed email address
    pub email: String,

    /// Argon2 PHC string
    ///
    /// Never serialized: `User` has no `Serialize` impl.
    pub password_hash: String,

    /// Timestamp when the user registered
    pub created_at: DateTime<Utc>,
}

/// A user ready to be inserted. The password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Request body for `POST /api/auth/register`.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation error with a readable message rather than a
/// deserialization failure.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "password": "correct horse",
///   "passwordConfirm": "correct horse"
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub password_confirm: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Convert database User to API UserResponse.
///
/// This transformation drops the password digest.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Response body for successful register and login calls.
///
/// ```json
/// {
///   "status": "success",
///   "token": "eyJhbGciOiJIUzI1NiJ9...",
///   "user": { "id": "...", "name": "Ada", "email": "ada@example.com", "createdAt": "..." }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: String,
    pub token: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn success(token: String, user: User) -> Self {
        Self {
            status: "success".to_string(),
            token,
            user: user.into(),
        }
    }
}
