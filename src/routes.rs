//! Router assembly.
//!
//! Public routes (banner, health, register, login) are merged with the
//! transaction routes, which all sit behind the bearer token guard.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    handlers,
    middleware::{
        auth::require_auth,
        cors::{OriginRule, cors_layer},
    },
    state::AppState,
};

pub fn build_router(state: AppState, origins: Vec<OriginRule>) -> Router {
    // Create authenticated routes (API endpoints)
    let transaction_routes = Router::new()
        .route(
            "/api/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/api/transactions/stats",
            get(handlers::transactions::transaction_stats),
        )
        .route(
            "/api/transactions/{id}",
            get(handlers::transactions::get_transaction)
                .put(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
        // Apply the route guard to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/", get(handlers::health::banner))
        .route("/health", get(handlers::health::health_check))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .merge(transaction_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(origins)),
        )
        .with_state(state)
}
