//! Route handlers
//!
//! - `auth`: send-otp, verify-otp and the auth health probe
//! - `customer`: profile and existence lookups by phone
//! - `health`: service root and overall health

pub mod auth;
pub mod customer;
pub mod health;
