//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request and response bodies built from them.

/// Income and expense records
pub mod transaction;
/// Registered users
pub mod user;
