//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle validation, ownership scoping and credential checks.

pub mod auth_service;
pub mod transaction_service;
