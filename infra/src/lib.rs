//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the PhoneBridge core
//! depends on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL record store for OTP challenges and customer identities (SQLx)
//! - **SMS**: SMS transports (Twilio, logging mock)
//! - **Commerce**: Shopify Admin and Storefront API clients (reqwest)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `twilio-sms`: Enable Twilio SMS service (default)

// Re-export core types for convenience
pub use pb_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

/// Commerce module - Shopify Admin and Storefront clients
pub mod commerce;

use pb_shared::AppConfig;

/// Load the application configuration from the environment
///
/// Reads `.env` first when present, then builds [`AppConfig`]. Call
/// [`check_config`] once logging is installed.
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// Check a loaded configuration
///
/// In production any problem is an error. Elsewhere the problems are
/// returned for the caller to log, so the service can still start and the
/// health endpoint can tell operators what is wrong.
pub fn check_config(config: &AppConfig) -> Result<Vec<String>, InfrastructureError> {
    match config.validate() {
        Ok(()) => Ok(Vec::new()),
        Err(problems) if config.environment.is_production() => {
            Err(InfrastructureError::Config(problems.join("; ")))
        }
        Err(problems) => Ok(problems),
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_shared::{CommerceConfig, Environment};

    fn configured() -> AppConfig {
        AppConfig {
            commerce: CommerceConfig {
                store_domain: "example.myshopify.com".to_string(),
                admin_api_token: "shpat_test".to_string(),
                storefront_access_token: "storefront_test".to_string(),
                ..CommerceConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_complete_config_has_no_problems() {
        assert!(check_config(&configured()).unwrap().is_empty());
    }

    #[test]
    fn test_problems_are_returned_outside_production() {
        let config = AppConfig {
            environment: Environment::Staging,
            ..AppConfig::default()
        };

        let problems = check_config(&config).unwrap();
        assert!(problems.iter().any(|p| p.contains("SHOPIFY_ADMIN_API_TOKEN")));
        assert!(problems.iter().any(|p| p.contains("SHOPIFY_STOREFRONT_ACCESS_TOKEN")));
    }

    #[test]
    fn test_problems_abort_production() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };

        match check_config(&config) {
            Err(InfrastructureError::Config(msg)) => assert!(msg.contains("SHOPIFY_STORE_DOMAIN")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
