//! Transaction service - Core business logic for income and expense records.
//!
//! This service handles:
//! - Field validation for create and update
//! - Building list filters from optional query parameters
//! - Ownership scoping (another user's record is reported as not found)
//! - Grouped statistics
//!
//! Every operation takes the acting user's id; the store applies it to every statement.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::transaction::{
        CreateTransactionRequest, ListTransactionsQuery, NewTransaction, Transaction,
        TransactionChanges, TransactionFilter, TransactionStats, TransactionType,
        UpdateTransactionRequest, parse_date,
    },
    store::TransactionStore,
};

const TITLE_MAX: usize = 100;
const CATEGORY_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 500;

/// Largest accepted amount (one trillion).
///
/// Keeps per-user sums far inside `Decimal`'s range, so totals never overflow.
// 1_000_000_000_000 = 0xE8_D4A5_1000, built via the const `from_parts`.
const AMOUNT_MAX: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

fn check_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(invalid("Please provide a title for the transaction"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(invalid("Title cannot be more than 100 characters"));
    }
    Ok(title.to_string())
}

fn check_amount(amount: Decimal) -> Result<Decimal, AppError> {
    if amount < Decimal::ZERO {
        return Err(invalid("Amount cannot be negative"));
    }
    if amount > AMOUNT_MAX {
        return Err(invalid("Amount cannot be more than 1000000000000"));
    }
    Ok(amount)
}

fn check_type(kind: &str) -> Result<TransactionType, AppError> {
    kind.trim()
        .parse()
        .map_err(|_| invalid("Type must be either income or expense"))
}

fn check_date(date: &str) -> Result<chrono::DateTime<Utc>, AppError> {
    parse_date(date).ok_or_else(|| invalid("Please provide a valid date"))
}

fn check_category(category: &str) -> Result<String, AppError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(invalid("Please provide a category"));
    }
    if category.chars().count() > CATEGORY_MAX {
        return Err(invalid("Category cannot be more than 50 characters"));
    }
    Ok(category.to_string())
}

/// Blank descriptions are stored as absent.
fn check_description(description: &str) -> Result<Option<String>, AppError> {
    let description = description.trim();
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(invalid("Description cannot be more than 500 characters"));
    }
    Ok(Some(description.to_string()).filter(|d| !d.is_empty()))
}

/// Validate a create request. Reports the first violated constraint.
///
/// A missing date defaults to now.
pub fn validate_new(request: CreateTransactionRequest) -> Result<NewTransaction, AppError> {
    let title = check_title(
        request
            .title
            .as_deref()
            .ok_or_else(|| invalid("Please provide a title for the transaction"))?,
    )?;
    let amount = check_amount(
        request
            .amount
            .ok_or_else(|| invalid("Please provide an amount"))?,
    )?;
    let kind = check_type(
        request
            .kind
            .as_deref()
            .ok_or_else(|| invalid("Please provide a type (income/expense)"))?,
    )?;
    let date = match request.date.as_deref() {
        Some(date) => check_date(date)?,
        None => Utc::now(),
    };
    let category = check_category(
        request
            .category
            .as_deref()
            .ok_or_else(|| invalid("Please provide a category"))?,
    )?;
    let description = match request.description.as_deref() {
        Some(description) => check_description(description)?,
        None => None,
    };

    Ok(NewTransaction {
        title,
        amount,
        kind,
        date,
        category,
        description,
    })
}

/// Validate the fields present in an update request against the create constraints.
pub fn validate_changes(request: UpdateTransactionRequest) -> Result<TransactionChanges, AppError> {
    Ok(TransactionChanges {
        title: request.title.as_deref().map(check_title).transpose()?,
        amount: request.amount.map(check_amount).transpose()?,
        kind: request.kind.as_deref().map(check_type).transpose()?,
        date: request.date.as_deref().map(check_date).transpose()?,
        category: request.category.as_deref().map(check_category).transpose()?,
        description: request
            .description
            .as_deref()
            .map(check_description)
            .transpose()?,
    })
}

/// Build a list filter from the query string. Empty parameters are ignored.
pub fn build_filter(query: ListTransactionsQuery) -> Result<TransactionFilter, AppError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let kind = non_empty(query.kind)
        .as_deref()
        .map(check_type)
        .transpose()?;
    let category = non_empty(query.category).map(|c| c.trim().to_string());
    let start_date = non_empty(query.start_date)
        .as_deref()
        .map(|d| parse_date(d).ok_or_else(|| invalid("Invalid startDate")))
        .transpose()?;
    let end_date = non_empty(query.end_date)
        .as_deref()
        .map(|d| parse_date(d).ok_or_else(|| invalid("Invalid endDate")))
        .transpose()?;

    Ok(TransactionFilter {
        kind,
        category,
        start_date,
        end_date,
    })
}

/// Parse a path id. A malformed id cannot name any record, so it is reported as not found.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::transaction_not_found())
}

/// List the owner's transactions matching `query`, newest first.
pub async fn list_transactions(
    store: &dyn TransactionStore,
    owner: Uuid,
    query: ListTransactionsQuery,
) -> Result<Vec<Transaction>, AppError> {
    let filter = build_filter(query)?;
    store.list_transactions(owner, &filter).await
}

/// Get transaction by ID.
pub async fn get_transaction(
    store: &dyn TransactionStore,
    owner: Uuid,
    id: Uuid,
) -> Result<Transaction, AppError> {
    store
        .get_transaction(owner, id)
        .await?
        .ok_or_else(AppError::transaction_not_found)
}

/// Create a transaction owned by `owner`.
pub async fn create_transaction(
    store: &dyn TransactionStore,
    owner: Uuid,
    request: CreateTransactionRequest,
) -> Result<Transaction, AppError> {
    let transaction = validate_new(request)?;
    let transaction = store.insert_transaction(owner, transaction).await?;
    tracing::info!(transaction_id = %transaction.id, user_id = %owner, "transaction created");
    Ok(transaction)
}

/// Update the supplied fields and return the stored record.
pub async fn update_transaction(
    store: &dyn TransactionStore,
    owner: Uuid,
    id: Uuid,
    request: UpdateTransactionRequest,
) -> Result<Transaction, AppError> {
    let changes = validate_changes(request)?;
    store
        .update_transaction(owner, id, &changes)
        .await?
        .ok_or_else(AppError::transaction_not_found)
}

/// Permanently delete a transaction.
pub async fn delete_transaction(
    store: &dyn TransactionStore,
    owner: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    if !store.delete_transaction(owner, id).await? {
        return Err(AppError::transaction_not_found());
    }
    tracing::info!(transaction_id = %id, user_id = %owner, "transaction deleted");
    Ok(())
}

/// Income, expense and balance totals for `owner`.
pub async fn transaction_stats(
    store: &dyn TransactionStore,
    owner: Uuid,
) -> Result<TransactionStats, AppError> {
    store.transaction_stats(owner).await
}
