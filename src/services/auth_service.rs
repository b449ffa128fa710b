//! Auth service - registration and login.
//!
//! This service handles:
//! - Required field and password confirmation checks
//! - Email normalisation and uniqueness
//! - Password hashing and verification
//! - Access token issuance

use crate::{
    error::AppError,
    models::user::{LoginRequest, NewUser, RegisterRequest, User},
    security::{password, token::TokenCodec},
    store::UserStore,
};

/// Same message for "no such user" and "wrong password" so callers cannot probe for accounts.
const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// Trim and lower-case an email for lookup and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal shape check: something before and after a single `@`, and a dot in the domain.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Treat missing and blank values the same way.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Register a new user.
///
/// # Process
///
/// 1. Check all four fields are present
/// 2. Check password and confirmation match
/// 3. Reject an email that is already registered
/// 4. Hash the password and store the user
/// 5. Sign a token for the new user
///
/// # Errors
///
/// - `Validation`: Missing field, mismatched passwords, malformed email
/// - `Conflict`: Email already registered
/// - `Database` / `Internal`: Store or hashing failure
pub async fn register(
    users: &dyn UserStore,
    tokens: &TokenCodec,
    request: RegisterRequest,
) -> Result<(String, User), AppError> {
    let (Some(name), Some(email), Some(password), Some(password_confirm)) = (
        present(request.name),
        present(request.email),
        present(request.password),
        present(request.password_confirm),
    ) else {
        return Err(AppError::Validation(
            "Please provide all required fields: name, email, password, passwordConfirm"
                .to_string(),
        ));
    };

    if password != password_confirm {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    let email = normalize_email(&email);
    if !looks_like_email(&email) {
        return Err(AppError::Validation(
            "Please provide a valid email".to_string(),
        ));
    }

    if users.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(
            "User already exists with this email".to_string(),
        ));
    }

    let password_hash = password::hash_password(password).await?;
    let user = users
        .create_user(NewUser {
            name: name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;
    tracing::info!(user_id = %user.id, "user registered");

    let token = tokens.sign(user.id)?;
    Ok((token, user))
}

/// Authenticate a user by email and password.
///
/// # Errors
///
/// - `Validation`: Email or password missing
/// - `Unauthorized`: Unknown email or wrong password (indistinguishable)
pub async fn login(
    users: &dyn UserStore,
    tokens: &TokenCodec,
    request: LoginRequest,
) -> Result<(String, User), AppError> {
    let (Some(email), Some(password)) = (present(request.email), present(request.password))
    else {
        return Err(AppError::Validation(
            "Please provide email and password".to_string(),
        ));
    };

    let email = normalize_email(&email);
    let Some(user) = users.find_user_by_email(&email).await? else {
        // Same Argon2 cost as a wrong password, so timing does not reveal the miss
        password::verify_password(password, password::dummy_digest().await?).await?;
        tracing::warn!("login rejected: unknown email");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    };

    if !password::verify_password(password, user.password_hash.clone()).await? {
        tracing::warn!(user_id = %user.id, "login rejected: wrong password");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    tracing::info!(user_id = %user.id, "user logged in");
    let token = tokens.sign(user.id)?;
    Ok((token, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::Duration;

    fn tokens() -> TokenCodec {
        TokenCodec::new("test-secret", Duration::hours(1))
    }

    fn registration(email: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some("Ada".to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            password_confirm: Some(confirm.to_string()),
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("ada@example.com"));
        assert!(!looks_like_email("ada"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ada@localhost"));
        assert!(!looks_like_email("ada@@example.com"));
        assert!(!looks_like_email("a da@example.com"));
    }

    #[tokio::test]
    async fn register_stores_a_digest_and_issues_a_token() {
        let store = MemoryStore::new();
        let (token, user) = register(
            &store,
            &tokens(),
            registration(" Ada@Example.com ", "hunter22", "hunter22"),
        )
        .await
        .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_ne!(user.password_hash, "hunter22");
        assert_eq!(tokens().verify(&token).unwrap(), user.id);
    }

    #[tokio::test]
    async fn register_rejects_missing_fields() {
        let store = MemoryStore::new();
        let mut request = registration("ada@example.com", "hunter22", "hunter22");
        request.name = Some("   ".to_string());

        let err = register(&store, &tokens(), request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords_without_persisting() {
        let store = MemoryStore::new();
        let err = register(
            &store,
            &tokens(),
            registration("ada@example.com", "hunter22", "hunter23"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Passwords do not match"));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_in_any_case() {
        let store = MemoryStore::new();
        register(
            &store,
            &tokens(),
            registration("ada@example.com", "hunter22", "hunter22"),
        )
        .await
        .unwrap();

        let err = register(
            &store,
            &tokens(),
            registration("ADA@example.com", "hunter22", "hunter22"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let store = MemoryStore::new();
        register(
            &store,
            &tokens(),
            registration("ada@example.com", "hunter22", "hunter22"),
        )
        .await
        .unwrap();

        let unknown = login(
            &store,
            &tokens(),
            LoginRequest {
                email: Some("bob@example.com".to_string()),
                password: Some("hunter22".to_string()),
            },
        )
        .await
        .unwrap_err();
        let wrong = login(
            &store,
            &tokens(),
            LoginRequest {
                email: Some("ada@example.com".to_string()),
                password: Some("hunter23".to_string()),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(unknown, AppError::Unauthorized(_)));
        assert!(matches!(wrong, AppError::Unauthorized(_)));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn unknown_email_still_runs_a_password_check() {
        let store = MemoryStore::new();

        let err = login(
            &store,
            &tokens(),
            LoginRequest {
                email: Some("nobody@example.com".to_string()),
                password: Some("hunter22".to_string()),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), BAD_CREDENTIALS);
        assert!(password::DUMMY_DIGEST.initialized());
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_credentials() {
        let store = MemoryStore::new();
        let (_, registered) = register(
            &store,
            &tokens(),
            registration("ada@example.com", "hunter22", "hunter22"),
        )
        .await
        .unwrap();

        let (token, user) = login(
            &store,
            &tokens(),
            LoginRequest {
                email: Some("Ada@Example.com".to_string()),
                password: Some("hunter22".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.id, registered.id);
        assert_eq!(tokens().verify(&token).unwrap(), registered.id);
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let store = MemoryStore::new();
        let err = login(&store, &tokens(), LoginRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
