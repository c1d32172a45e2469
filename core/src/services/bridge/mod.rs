//! Credential bridge between phone login and storefront customer accounts
//!
//! The platform exposes two surfaces that do not overlap: the admin API can
//! create customers with a password but never reveal it, and the storefront
//! API can exchange email and password for an access token but cannot
//! create customers. The bridge creates each customer once with a hidden
//! email and password, keeps those credentials locally, and exchanges them
//! for a fresh token on every login.

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::BridgeConfig;
pub use service::CredentialBridge;
pub use traits::{CommerceAdminApi, StorefrontApi};
pub use types::{BridgeOutcome, CustomerAccessToken, NewPlatformCustomer, PlatformCustomer};
