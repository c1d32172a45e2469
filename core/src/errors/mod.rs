//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, BridgeError, OtpError};

use thiserror::Error;

/// Record store errors, returned by repositories
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}
