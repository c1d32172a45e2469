use serde::{Deserialize, Serialize};
use validator::Validate;

/// `?phone=` query used by the customer lookups
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhoneQuery {
    #[validate(length(min = 10, max = 24, message = "Phone number is required"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerExistsResponse {
    pub exists: bool,
    pub phone: String,
}
