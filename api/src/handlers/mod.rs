//! Error handling for the HTTP layer

pub mod error;

pub use error::{handle_auth_error, handle_validation_error, status_for};
