//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing an income or expense entry
//! - Raw request bodies for create/update and the list query string
//! - Validated forms (`NewTransaction`, `TransactionChanges`, `TransactionFilter`)
//! - `TransactionResponse` and `TransactionStats`: Response bodies returned to clients

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Whether money came in or went out.
///
/// Stored as the Postgres enum `transaction_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "transaction_type", rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(()),
        }
    }
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - Belongs to exactly one user (`user_id`, never changes after insert)
/// - Has a non-negative amount (enforced by CHECK constraint)
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,

    /// Owner of this transaction
    pub user_id: Uuid,

    pub title: String,

    pub amount: Decimal,

    #[sqlx(rename = "type")]
    pub kind: TransactionType,

    /// When the money moved. Defaults to insertion time.
    pub date: DateTime<Utc>,

    pub category: String,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/transactions`.
///
/// Fields are parsed loosely and checked by the transaction service so that
/// the client gets the first violated constraint as a readable message.
/// Any `user` field sent by the client is ignored.
///
/// # JSON Example
///
/// ```json
/// {
///   "title": "Salary",
///   "amount": 5000,
///   "type": "income",
///   "date": "2025-01-31",
///   "category": "Work",
///   "description": "January payroll"
/// }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub amount: Option<Decimal>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for `PUT /api/transactions/{id}`.
///
/// Any subset of the mutable fields. Absent fields keep their stored value.
pub type UpdateTransactionRequest = CreateTransactionRequest;

/// Query string for `GET /api/transactions`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,
}

/// A validated transaction ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub date: DateTime<Utc>,
    pub category: String,
    pub description: Option<String>,
}

/// A validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionChanges {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub kind: Option<TransactionType>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

impl TransactionChanges {
    /// Apply the changes to an existing record in place.
    pub fn apply_to(&self, transaction: &mut Transaction) {
        if let Some(title) = &self.title {
            transaction.title = title.clone();
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(kind) = self.kind {
            transaction.kind = kind;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(category) = &self.category {
            transaction.category = category.clone();
        }
        if let Some(description) = &self.description {
            transaction.description = description.clone();
        }
    }
}

/// Validated list filter. Every field is optional; the owner is always applied separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Exact type match
    pub kind: Option<TransactionType>,

    /// Case-insensitive substring of the category
    pub category: Option<String>,

    /// Inclusive lower bound on `date`
    pub start_date: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `date`
    pub end_date: Option<DateTime<Utc>>,
}

/// Response returned for transaction operations.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "title": "Rent",
///   "amount": 1200.0,
///   "type": "expense",
///   "date": "2025-02-01T00:00:00Z",
///   "category": "Housing",
///   "description": null,
///   "user": "550e8400-e29b-41d4-a716-446655440000",
///   "createdAt": "2025-02-01T09:12:44Z",
///   "updatedAt": "2025-02-01T09:12:44Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: DateTime<Utc>,
    pub category: String,
    pub description: Option<String>,
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            title: transaction.title,
            amount: transaction.amount,
            kind: transaction.kind,
            date: transaction.date,
            category: transaction.category,
            description: transaction.description,
            user: transaction.user_id,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

/// Totals per type for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransactionStats {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl TransactionStats {
    /// Fold `(type, sum)` groups from a grouped aggregation into totals.
    ///
    /// A type with no rows contributes zero. Totals outside `Decimal`'s range
    /// are an internal error, never a panic.
    pub fn from_groups(
        groups: impl IntoIterator<Item = (TransactionType, Decimal)>,
    ) -> Result<Self, AppError> {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;

        for (kind, total) in groups {
            let sum = match kind {
                TransactionType::Income => &mut income,
                TransactionType::Expense => &mut expense,
            };
            *sum = sum.checked_add(total).ok_or_else(totals_overflowed)?;
        }

        Ok(Self {
            income,
            expense,
            balance: income.checked_sub(expense).ok_or_else(totals_overflowed)?,
        })
    }
}

fn totals_overflowed() -> AppError {
    AppError::Internal("transaction totals overflowed".to_string())
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: String,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            status: "success".to_string(),
            message: "Transaction deleted successfully".to_string(),
        }
    }
}

/// Parse a client supplied date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]` without offset (read
/// as UTC) and plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
