//! Value objects representing immutable domain concepts.

pub mod customer_profile;
pub mod hidden_credentials;

// Re-export commonly used types
pub use customer_profile::CustomerProfile;
pub use hidden_credentials::{derive_hidden_email, generate_hidden_password, PASSWORD_ALPHABET};
