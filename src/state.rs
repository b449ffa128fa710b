//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    security::token::TokenCodec,
    store::{TransactionStore, UserStore},
};

/// Built once at startup and cloned per request (every field is reference counted).
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub transactions: Arc<dyn TransactionStore>,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        transactions: Arc<dyn TransactionStore>,
        tokens: TokenCodec,
    ) -> Self {
        Self {
            users,
            transactions,
            tokens: Arc::new(tokens),
        }
    }
}
