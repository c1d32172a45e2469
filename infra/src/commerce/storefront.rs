//! Shopify Storefront API client: the email/password to access token
//! exchange at the end of every login.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use pb_core::errors::BridgeError;
use pb_core::services::bridge::{CustomerAccessToken, StorefrontApi};
use pb_shared::CommerceConfig;

use super::build_http_client;
use super::graphql::{classify_request_error, ApiSurface, GraphQLRequest, GraphQLResponse};
use crate::InfrastructureError;

const STOREFRONT_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

const CUSTOMER_ACCESS_TOKEN_CREATE: &str = r#"
mutation($input: CustomerAccessTokenCreateInput!) {
    customerAccessTokenCreate(input: $input) {
        customerAccessToken {
            accessToken
            expiresAt
        }
        customerUserErrors {
            code
            field
            message
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenCreateData {
    customer_access_token_create: Option<TokenCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenCreatePayload {
    customer_access_token: Option<AccessTokenNode>,
    #[serde(default)]
    customer_user_errors: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenNode {
    access_token: String,
    expires_at: String,
}

/// Shopify Storefront API client
#[derive(Clone)]
pub struct ShopifyStorefrontClient {
    client: reqwest::Client,
    config: CommerceConfig,
}

impl ShopifyStorefrontClient {
    /// Create a client for the configured store
    pub fn new(config: CommerceConfig) -> Result<Self, InfrastructureError> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    /// Create with an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: CommerceConfig) -> Self {
        Self { client, config }
    }
}

/// Turn a decoded mutation response into a token or the platform's reasons
fn parse_token_response(
    response: GraphQLResponse<TokenCreateData>,
) -> Result<CustomerAccessToken, BridgeError> {
    if let Some(errors) = response.top_level_errors() {
        return Err(BridgeError::TokenExchangeFailed {
            errors: errors.clone(),
        });
    }

    let payload = response
        .data
        .and_then(|data| data.customer_access_token_create)
        .ok_or_else(|| BridgeError::TokenExchangeFailed {
            errors: json!("empty customerAccessTokenCreate payload"),
        })?;

    if !payload.customer_user_errors.is_empty() {
        return Err(BridgeError::TokenExchangeFailed {
            errors: Value::Array(payload.customer_user_errors),
        });
    }

    payload
        .customer_access_token
        .map(|token| CustomerAccessToken {
            access_token: token.access_token,
            expires_at: token.expires_at,
        })
        .ok_or_else(|| BridgeError::TokenExchangeFailed {
            errors: json!("no customerAccessToken returned"),
        })
}

#[async_trait]
impl StorefrontApi for ShopifyStorefrontClient {
    async fn create_customer_access_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerAccessToken, BridgeError> {
        let request = GraphQLRequest {
            query: CUSTOMER_ACCESS_TOKEN_CREATE,
            variables: json!({ "input": { "email": email, "password": password } }),
        };

        let response = self
            .client
            .post(self.config.storefront_graphql_url())
            .header(STOREFRONT_TOKEN_HEADER, &self.config.storefront_access_token)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| classify_request_error(ApiSurface::Storefront, &e))?;

        let body: GraphQLResponse<TokenCreateData> = response
            .json()
            .await
            .map_err(|e| classify_request_error(ApiSurface::Storefront, &e))?;

        parse_token_response(body).map_err(|err| {
            if let BridgeError::TokenExchangeFailed { errors } = &err {
                warn!(event = "token_exchange_rejected", errors = %errors, "Storefront refused the hidden credentials");
            }
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: Value) -> GraphQLResponse<TokenCreateData> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_token_is_passed_through() {
        let token = parse_token_response(decode(json!({
            "data": {"customerAccessTokenCreate": {
                "customerAccessToken": {
                    "accessToken": "abc123",
                    "expiresAt": "2026-11-15T10:00:00Z"
                },
                "customerUserErrors": []
            }}
        })))
        .unwrap();

        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.expires_at, "2026-11-15T10:00:00Z");
    }

    #[test]
    fn test_user_errors_are_a_failed_exchange() {
        let err = parse_token_response(decode(json!({
            "data": {"customerAccessTokenCreate": {
                "customerAccessToken": null,
                "customerUserErrors": [{
                    "code": "UNIDENTIFIED_CUSTOMER",
                    "field": ["input", "password"],
                    "message": "Unidentified customer"
                }]
            }}
        })))
        .unwrap_err();

        match err {
            BridgeError::TokenExchangeFailed { errors } => {
                assert_eq!(errors[0]["code"], "UNIDENTIFIED_CUSTOMER");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_errors_are_a_failed_exchange() {
        let err = parse_token_response(decode(json!({
            "errors": [{"message": "Throttled"}]
        })))
        .unwrap_err();
        assert!(matches!(err, BridgeError::TokenExchangeFailed { .. }));
    }

    #[test]
    fn test_missing_token_without_errors_is_a_failed_exchange() {
        let err = parse_token_response(decode(json!({
            "data": {"customerAccessTokenCreate": {"customerAccessToken": null}}
        })))
        .unwrap_err();
        assert!(matches!(err, BridgeError::TokenExchangeFailed { .. }));
    }
}
