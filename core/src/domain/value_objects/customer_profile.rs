//! Public customer view returned by profile lookups.

use serde::{Deserialize, Serialize};

/// Customer fields safe to hand to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerProfile {
    /// Local record id
    pub id: String,

    /// Phone number (E.164)
    pub phone: String,

    /// Hidden email the platform account uses
    pub email: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Platform customer id
    pub platform_customer_id: String,
}
