//! Commerce platform clients
//!
//! Shopify exposes two surfaces the credential bridge needs:
//! - **Admin API** (`admin`): customer lookup over GraphQL, customer creation
//!   and password updates over REST
//! - **Storefront API** (`storefront`): email/password exchange for a
//!   customer access token over GraphQL
//!
//! Both clients use a `reqwest::Client` with the configured request timeout.
//! Timeouts and connection failures surface as `BridgeError::Transport`.

use std::time::Duration;

use pb_shared::CommerceConfig;

use crate::InfrastructureError;

pub mod admin;
pub mod graphql;
pub mod storefront;

pub use admin::ShopifyAdminClient;
pub use storefront::ShopifyStorefrontClient;

/// Build the HTTP client shared by both surfaces
pub fn build_http_client(config: &CommerceConfig) -> Result<reqwest::Client, InfrastructureError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;
    Ok(client)
}
