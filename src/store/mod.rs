//! Storage capabilities used by the services.
//!
//! The services never talk to the database directly. They depend on these
//! traits so that every query is scoped by owner in exactly one place, and so
//! the HTTP layer can be exercised against an in-memory store in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        transaction::{
            NewTransaction, Transaction, TransactionChanges, TransactionFilter, TransactionStats,
        },
        user::{NewUser, User},
    },
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with `AppError::Conflict` if the email is already taken.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    /// Look up a user by (already normalised) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
}

/// Transaction persistence. Every method is scoped to `owner`.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Matching transactions, newest `date` first.
    async fn list_transactions(
        &self,
        owner: Uuid,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError>;

    async fn get_transaction(&self, owner: Uuid, id: Uuid) -> Result<Option<Transaction>, AppError>;

    async fn insert_transaction(
        &self,
        owner: Uuid,
        transaction: NewTransaction,
    ) -> Result<Transaction, AppError>;

    /// Apply `changes` in a single write. Returns `None` if `id` is not owned by `owner`.
    async fn update_transaction(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &TransactionChanges,
    ) -> Result<Option<Transaction>, AppError>;

    /// Returns `false` if nothing was deleted.
    async fn delete_transaction(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Sum of amounts grouped by type, computed in one read.
    async fn transaction_stats(&self, owner: Uuid) -> Result<TransactionStats, AppError>;
}
