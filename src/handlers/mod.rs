//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Calls the matching service operation
//! 3. Returns HTTP response (JSON, status code)

/// Registration and login endpoints
pub mod auth;
/// Service banner and health check
pub mod health;
/// Transaction CRUD and statistics endpoints
pub mod transactions;
