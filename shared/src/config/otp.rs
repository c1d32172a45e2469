//! One-time code configuration module

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Settings for OTP generation and the SMS that carries it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a code
    pub code_length: usize,

    /// Minutes until an issued code expires
    pub expiration_minutes: i64,

    /// Brand name used in the SMS body
    pub brand_name: String,

    /// Country code prepended to bare 10-digit numbers
    pub default_country_code: String,

    /// Include the code in the operator-facing status when SMS delivery fails.
    /// Never enable in production.
    #[serde(default)]
    pub expose_code_on_degraded_delivery: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            expiration_minutes: 10,
            brand_name: String::from("PhoneBridge"),
            default_country_code: String::from("+91"),
            expose_code_on_degraded_delivery: false,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: env_parse("OTP_LENGTH", defaults.code_length),
            expiration_minutes: env_parse("OTP_EXPIRATION_MINUTES", defaults.expiration_minutes),
            brand_name: env_string("OTP_BRAND_NAME", &defaults.brand_name),
            default_country_code: env_string("DEFAULT_COUNTRY_CODE", &defaults.default_country_code),
            expose_code_on_degraded_delivery: env_parse("OTP_EXPOSE_CODE_ON_DEGRADED_DELIVERY", false),
        }
    }
}
