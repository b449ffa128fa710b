//! In-memory store used by the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
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

use super::{TransactionStore, UserStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    transactions: RwLock<HashMap<Uuid, Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

fn matches(transaction: &Transaction, filter: &TransactionFilter) -> bool {
    filter.kind.is_none_or(|kind| transaction.kind == kind)
        && filter.category.as_ref().is_none_or(|category| {
            transaction
                .category
                .to_lowercase()
                .contains(&category.to_lowercase())
        })
        && filter.start_date.is_none_or(|start| transaction.date >= start)
        && filter.end_date.is_none_or(|end| transaction.date <= end)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::Conflict(
                "User already exists with this email".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn list_transactions(
        &self,
        owner: Uuid,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError> {
        let transactions = self.transactions.read().await;
        let mut matching: Vec<Transaction> = transactions
            .values()
            .filter(|transaction| transaction.user_id == owner && matches(transaction, filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(matching)
    }

    async fn get_transaction(&self, owner: Uuid, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .get(&id)
            .filter(|transaction| transaction.user_id == owner)
            .cloned())
    }

    async fn insert_transaction(
        &self,
        owner: Uuid,
        transaction: NewTransaction,
    ) -> Result<Transaction, AppError> {
        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id: owner,
            title: transaction.title,
            amount: transaction.amount,
            kind: transaction.kind,
            date: transaction.date,
            category: transaction.category,
            description: transaction.description,
            created_at: now,
            updated_at: now,
        };
        self.transactions
            .write()
            .await
            .insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &TransactionChanges,
    ) -> Result<Option<Transaction>, AppError> {
        let mut transactions = self.transactions.write().await;
        let Some(transaction) = transactions
            .get_mut(&id)
            .filter(|transaction| transaction.user_id == owner)
        else {
            return Ok(None);
        };

        changes.apply_to(transaction);
        transaction.updated_at = Utc::now();
        Ok(Some(transaction.clone()))
    }

    async fn delete_transaction(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut transactions = self.transactions.write().await;
        let owned = transactions
            .get(&id)
            .is_some_and(|transaction| transaction.user_id == owner);
        if owned {
            transactions.remove(&id);
        }
        Ok(owned)
    }

    async fn transaction_stats(&self, owner: Uuid) -> Result<TransactionStats, AppError> {
        let transactions = self.transactions.read().await;
        TransactionStats::from_groups(
            transactions
                .values()
                .filter(|transaction| transaction.user_id == owner)
                .map(|transaction| (transaction.kind, transaction.amount)),
        )
    }
}
