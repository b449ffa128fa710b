//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Authenticate requests
//! - Restrict cross-origin access
//! - Short-circuit requests (reject unauthorized)

/// Bearer token route guard
pub mod auth;
/// CORS allow-list
pub mod cors;
