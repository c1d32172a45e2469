//! Shopify Admin API client
//!
//! Customer lookup goes through Admin GraphQL. Creation and password updates
//! use the REST surface, which accepts `password`/`password_confirmation`
//! where the GraphQL customer input does not.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use pb_core::errors::BridgeError;
use pb_core::services::bridge::{CommerceAdminApi, NewPlatformCustomer, PlatformCustomer};
use pb_shared::phone::mask_phone_number;
use pb_shared::CommerceConfig;

use super::build_http_client;
use super::graphql::{classify_request_error, ApiSurface, GraphQLRequest, GraphQLResponse};
use crate::InfrastructureError;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const FIND_CUSTOMER_BY_PHONE: &str = r#"
query($query: String!) {
    customers(first: 1, query: $query) {
        edges {
            node {
                id
                email
                phone
                firstName
                lastName
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
struct CustomersData {
    customers: CustomerConnection,
}

#[derive(Debug, Deserialize)]
struct CustomerConnection {
    edges: Vec<CustomerEdge>,
}

#[derive(Debug, Deserialize)]
struct CustomerEdge {
    node: CustomerNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerNode {
    id: String,
    email: Option<String>,
    phone: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<CustomerNode> for PlatformCustomer {
    fn from(node: CustomerNode) -> Self {
        Self {
            id: node.id,
            email: node.email,
            phone: node.phone,
            first_name: node.first_name,
            last_name: node.last_name,
        }
    }
}

/// Customer object in REST responses
#[derive(Debug, Deserialize)]
struct RestCustomer {
    id: u64,
    admin_graphql_api_id: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RestCustomerEnvelope {
    customer: Option<RestCustomer>,
}

/// Shopify Admin API client
#[derive(Clone)]
pub struct ShopifyAdminClient {
    client: reqwest::Client,
    config: CommerceConfig,
}

impl ShopifyAdminClient {
    /// Create a client for the configured store
    pub fn new(config: CommerceConfig) -> Result<Self, InfrastructureError> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    /// Create with an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: CommerceConfig) -> Self {
        Self { client, config }
    }

    fn customer_body(customer: &NewPlatformCustomer) -> Value {
        let mut body = json!({
            "customer": {
                "email": customer.email,
                "password": customer.password,
                "password_confirmation": customer.password,
                "send_email_welcome": false,
                "verified_email": true,
            }
        });
        if let Some(phone) = &customer.phone {
            body["customer"]["phone"] = json!(phone);
        }
        body
    }
}

/// Convert a REST customer into the GraphQL-shaped platform customer
fn rest_customer_to_platform(customer: RestCustomer) -> PlatformCustomer {
    PlatformCustomer {
        id: customer
            .admin_graphql_api_id
            .unwrap_or_else(|| format!("gid://shopify/Customer/{}", customer.id)),
        email: customer.email,
        phone: customer.phone,
        first_name: customer.first_name,
        last_name: customer.last_name,
    }
}

/// Whether a 422 body blames the phone field
fn is_phone_rejection(status: StatusCode, body: &Value) -> bool {
    status == StatusCode::UNPROCESSABLE_ENTITY
        && body
            .get("errors")
            .and_then(Value::as_object)
            .is_some_and(|errors| errors.contains_key("phone"))
}

/// Reject a creation response that is not a 2xx
///
/// A 422 blaming the phone field is `PhoneRejected` when a phone was sent,
/// so the bridge can retry without it.
fn check_creation_status(status: StatusCode, body: &Value, phone_sent: bool) -> Result<(), BridgeError> {
    if phone_sent && is_phone_rejection(status, body) {
        return Err(BridgeError::PhoneRejected {
            message: body["errors"]["phone"].to_string(),
        });
    }

    if !status.is_success() {
        return Err(BridgeError::AdminApi {
            message: format!("customer creation returned status {}: {}", status, body),
        });
    }

    Ok(())
}

/// Parse the body of a successful creation
fn parse_created_customer(body: Value) -> Result<PlatformCustomer, BridgeError> {
    let envelope: RestCustomerEnvelope =
        serde_json::from_value(body).map_err(|e| BridgeError::CustomerCreationFailed {
            message: format!("unexpected response body: {}", e),
        })?;

    envelope
        .customer
        .map(rest_customer_to_platform)
        .ok_or_else(|| BridgeError::CustomerCreationFailed {
            message: "No customer returned from REST API".to_string(),
        })
}

/// Numeric part of a platform id (`gid://shopify/Customer/42` -> `42`)
pub fn numeric_customer_id(platform_customer_id: &str) -> &str {
    platform_customer_id
        .rsplit('/')
        .next()
        .unwrap_or(platform_customer_id)
}

#[async_trait]
impl CommerceAdminApi for ShopifyAdminClient {
    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<PlatformCustomer>, BridgeError> {
        let request = GraphQLRequest {
            query: FIND_CUSTOMER_BY_PHONE,
            variables: json!({ "query": format!("phone:{}", phone) }),
        };

        debug!(phone = %mask_phone_number(phone), "Looking up platform customer by phone");

        let response = self
            .client
            .post(self.config.admin_graphql_url())
            .header(ACCESS_TOKEN_HEADER, &self.config.admin_api_token)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| classify_request_error(ApiSurface::Admin, &e))?;

        let body: GraphQLResponse<CustomersData> = response
            .json()
            .await
            .map_err(|e| classify_request_error(ApiSurface::Admin, &e))?;

        if let Some(errors) = body.top_level_errors() {
            error!(event = "admin_graphql_error", errors = %errors, "Admin API returned errors");
            return Err(BridgeError::AdminApi {
                message: errors.to_string(),
            });
        }

        Ok(body
            .data
            .and_then(|data| data.customers.edges.into_iter().next())
            .map(|edge| edge.node.into()))
    }

    async fn create_customer(
        &self,
        customer: &NewPlatformCustomer,
    ) -> Result<PlatformCustomer, BridgeError> {
        let response = self
            .client
            .post(self.config.admin_customers_url())
            .header(ACCESS_TOKEN_HEADER, &self.config.admin_api_token)
            .json(&Self::customer_body(customer))
            .send()
            .await
            .map_err(|e| classify_request_error(ApiSurface::Admin, &e))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        check_creation_status(status, &body, customer.phone.is_some()).map_err(|err| {
            if let BridgeError::AdminApi { .. } = err {
                error!(
                    event = "customer_create_failed",
                    status = status.as_u16(),
                    "Platform refused customer creation"
                );
            }
            err
        })?;

        let created = parse_created_customer(body)?;
        info!(event = "platform_customer_created", customer_id = %created.id, "Platform customer created");
        Ok(created)
    }

    async fn update_customer_password(
        &self,
        platform_customer_id: &str,
        password: &str,
    ) -> Result<(), BridgeError> {
        let numeric_id = numeric_customer_id(platform_customer_id);
        let body = json!({
            "customer": {
                "id": numeric_id,
                "password": password,
                "password_confirmation": password,
            }
        });

        let response = self
            .client
            .put(self.config.admin_customer_url(numeric_id))
            .header(ACCESS_TOKEN_HEADER, &self.config.admin_api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_request_error(ApiSurface::Admin, &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BridgeError::AdminApi {
                message: format!("password update failed with status {}: {}", status, text),
            });
        }

        info!(event = "platform_password_updated", customer_id = %platform_customer_id, "Platform password updated");
        Ok(())
    }
}
