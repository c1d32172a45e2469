//! Configuration for the authentication service

use pb_shared::{Environment, OtpConfig};

use crate::domain::entities::DEFAULT_CODE_LENGTH;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Country code prepended to bare 10-digit numbers
    pub default_country_code: String,
    /// Expected length of submitted codes
    pub code_length: usize,
    /// Put the code in the operator status message when SMS delivery failed
    pub expose_code_on_degraded_delivery: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            default_country_code: String::from("+91"),
            code_length: DEFAULT_CODE_LENGTH,
            expose_code_on_degraded_delivery: false,
        }
    }
}

impl AuthServiceConfig {
    /// Build from OTP settings; code exposure is never honoured in production
    pub fn from_otp_config(config: &OtpConfig, environment: Environment) -> Self {
        Self {
            default_country_code: config.default_country_code.clone(),
            code_length: config.code_length,
            expose_code_on_degraded_delivery: config.expose_code_on_degraded_delivery
                && !environment.is_production(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_exposure_disabled_in_production() {
        let otp = OtpConfig {
            expose_code_on_degraded_delivery: true,
            ..OtpConfig::default()
        };

        assert!(AuthServiceConfig::from_otp_config(&otp, Environment::Development).expose_code_on_degraded_delivery);
        assert!(!AuthServiceConfig::from_otp_config(&otp, Environment::Production).expose_code_on_degraded_delivery);
    }
}
