//! GraphQL request/response envelopes and error classification shared by
//! the Admin and Storefront clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pb_core::errors::BridgeError;

/// GraphQL request body
#[derive(Debug, Serialize)]
pub struct GraphQLRequest {
    pub query: &'static str,
    pub variables: Value,
}

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Value>,
}

impl<T> GraphQLResponse<T> {
    /// Top-level `errors`, when present and non-empty
    pub fn top_level_errors(&self) -> Option<&Value> {
        match &self.errors {
            Some(Value::Null) | None => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(errors) => Some(errors),
        }
    }
}

/// Which commerce API a request went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    Admin,
    Storefront,
}

impl ApiSurface {
    /// Failure answered by this surface (bad status, undecodable body)
    pub fn failure(self, message: String) -> BridgeError {
        match self {
            ApiSurface::Admin => BridgeError::AdminApi { message },
            ApiSurface::Storefront => BridgeError::TokenExchangeFailed {
                errors: Value::String(message),
            },
        }
    }
}

/// Classify a reqwest failure
///
/// Timeouts and connection failures mean the platform was unreachable;
/// anything else is a failure of the surface that was called.
pub fn classify_request_error(surface: ApiSurface, err: &reqwest::Error) -> BridgeError {
    if err.is_timeout() || err.is_connect() {
        BridgeError::Transport {
            message: err.to_string(),
        }
    } else {
        surface.failure(err.to_string())
    }
}
