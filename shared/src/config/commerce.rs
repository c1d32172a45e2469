//! Storefront platform configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Endpoints and credentials for the commerce platform's two API surfaces
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommerceConfig {
    /// Store domain, e.g. `my-store.myshopify.com`
    pub store_domain: String,

    /// Static token for the administrative API
    #[serde(skip_serializing)]
    pub admin_api_token: String,

    /// Static token for the customer-facing (storefront) API
    #[serde(skip_serializing)]
    pub storefront_access_token: String,

    /// API version segment used in every URL
    pub api_version: String,

    /// Per-call timeout in seconds
    pub request_timeout_secs: u64,

    /// Domain used for derived hidden emails
    pub hidden_email_domain: String,

    /// Length of generated hidden passwords
    pub password_length: usize,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            store_domain: String::new(),
            admin_api_token: String::new(),
            storefront_access_token: String::new(),
            api_version: String::from("2024-10"),
            request_timeout_secs: 30,
            hidden_email_domain: String::from("phonebridge.internal"),
            password_length: 16,
        }
    }
}

impl CommerceConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store_domain: env_string("SHOPIFY_STORE_DOMAIN", ""),
            admin_api_token: env_string("SHOPIFY_ADMIN_API_TOKEN", ""),
            storefront_access_token: env_string("SHOPIFY_STOREFRONT_ACCESS_TOKEN", ""),
            api_version: env_string("SHOPIFY_API_VERSION", &defaults.api_version),
            request_timeout_secs: env_parse("SHOPIFY_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            hidden_email_domain: env_string("HIDDEN_EMAIL_DOMAIN", &defaults.hidden_email_domain),
            password_length: env_parse("HIDDEN_PASSWORD_LENGTH", defaults.password_length),
        }
    }

    /// Whether both API surfaces have credentials
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of required settings that are empty
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.store_domain.trim().is_empty() {
            missing.push("SHOPIFY_STORE_DOMAIN is not set".to_string());
        }
        if self.admin_api_token.trim().is_empty() {
            missing.push("SHOPIFY_ADMIN_API_TOKEN is not set".to_string());
        }
        if self.storefront_access_token.trim().is_empty() {
            missing.push("SHOPIFY_STOREFRONT_ACCESS_TOKEN is not set".to_string());
        }
        missing
    }

    /// Administrative GraphQL endpoint
    pub fn admin_graphql_url(&self) -> String {
        format!("https://{}/admin/api/{}/graphql.json", self.store_domain, self.api_version)
    }

    /// Administrative REST customer collection endpoint
    pub fn admin_customers_url(&self) -> String {
        format!("https://{}/admin/api/{}/customers.json", self.store_domain, self.api_version)
    }

    /// Administrative REST endpoint for a single customer
    pub fn admin_customer_url(&self, numeric_id: &str) -> String {
        format!(
            "https://{}/admin/api/{}/customers/{}.json",
            self.store_domain, self.api_version, numeric_id
        )
    }

    /// Customer-facing GraphQL endpoint
    pub fn storefront_graphql_url(&self) -> String {
        format!("https://{}/api/{}/graphql.json", self.store_domain, self.api_version)
    }
}
