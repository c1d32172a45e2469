//! Database module - MySQL implementations using SQLx
//!
//! This module provides the record store behind the core repository traits:
//! - Connection pool management and schema bootstrap
//! - `otp_challenges` repository
//! - `customer_identities` repository

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlCustomerIdentityRepository, MySqlOtpChallengeRepository};
