//! PostgreSQL implementation of the storage traits.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        transaction::{
            NewTransaction, Transaction, TransactionChanges, TransactionFilter, TransactionStats,
            TransactionType,
        },
        user::{NewUser, User},
    },
};

use super::{TransactionStore, UserStore};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, title, amount, type, date, category, description, created_at, updated_at";

/// Store backed by the shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` wildcards so user input is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append the filter conditions to a query that already ends in a `WHERE` clause.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &TransactionFilter) {
    if let Some(kind) = filter.kind {
        query.push(" AND type = ").push_bind(kind);
    }
    if let Some(category) = &filter.category {
        query
            .push(" AND category ILIKE ")
            .push_bind(format!("%{}%", escape_like(category)));
    }
    if let Some(start) = filter.start_date {
        query.push(" AND date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        query.push(" AND date <= ").push_bind(end);
    }
}

/// Grouped totals for one user; both sums come from the same snapshot.
const STATS_SQL: &str =
    "SELECT type, COALESCE(SUM(amount), 0) FROM transactions WHERE user_id = $1 GROUP BY type";

/// Single `UPDATE` that sets only the supplied fields, scoped to the owner.
fn build_update(
    owner: Uuid,
    id: Uuid,
    changes: &TransactionChanges,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("UPDATE transactions SET updated_at = NOW()");

    if let Some(title) = &changes.title {
        query.push(", title = ").push_bind(title.clone());
    }
    if let Some(amount) = changes.amount {
        query.push(", amount = ").push_bind(amount);
    }
    if let Some(kind) = changes.kind {
        query.push(", type = ").push_bind(kind);
    }
    if let Some(date) = changes.date {
        query.push(", date = ").push_bind(date);
    }
    if let Some(category) = &changes.category {
        query.push(", category = ").push_bind(category.clone());
    }
    if let Some(description) = &changes.description {
        query
            .push(", description = ")
            .push_bind(description.clone());
    }

    query
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND user_id = ")
        .push_bind(owner)
        .push(format!(" RETURNING {TRANSACTION_COLUMNS}"));

    query
}

/// Two concurrent registrations can both pass the service's email lookup;
/// the unique index settles it.
fn user_insert_error(err: sqlx::Error) -> AppError {
    if err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
    {
        AppError::Conflict("User already exists with this email".to_string())
    } else {
        AppError::Database(err)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(user_insert_error)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl TransactionStore for PgStore {
    async fn list_transactions(
        &self,
        owner: Uuid,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE user_id = "
        ));
        query.push_bind(owner);
        push_filter(&mut query, filter);
        query.push(" ORDER BY date DESC, created_at DESC");

        let transactions = query
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;

        Ok(transactions)
    }

    async fn get_transaction(&self, owner: Uuid, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        // Ownership filter: another user's id behaves exactly like a missing one
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn insert_transaction(
        &self,
        owner: Uuid,
        transaction: NewTransaction,
    ) -> Result<Transaction, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions (user_id, title, amount, type, date, category, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(transaction.title)
        .bind(transaction.amount)
        .bind(transaction.kind)
        .bind(transaction.date)
        .bind(transaction.category)
        .bind(transaction.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &TransactionChanges,
    ) -> Result<Option<Transaction>, AppError> {
        let mut query = build_update(owner, id, changes);

        let transaction = query
            .build_query_as::<Transaction>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(transaction)
    }

    async fn delete_transaction(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let deleted = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn transaction_stats(&self, owner: Uuid) -> Result<TransactionStats, AppError> {
        let groups = sqlx::query_as::<_, (TransactionType, Decimal)>(STATS_SQL)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        TransactionStats::from_groups(groups)
    }
}
