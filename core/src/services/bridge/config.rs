//! Configuration for the credential bridge

use std::time::Duration;

use pb_shared::CommerceConfig;

/// Configuration for the credential bridge
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Domain used for derived hidden emails
    pub hidden_email_domain: String,
    /// Length of generated hidden passwords
    pub password_length: usize,
    /// Pause inserted right before platform customer creation. Only tests set
    /// this, to open the window in which two first logins race.
    pub creation_delay: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            hidden_email_domain: String::from("phonebridge.internal"),
            password_length: 16,
            creation_delay: None,
        }
    }
}

impl From<&CommerceConfig> for BridgeConfig {
    fn from(config: &CommerceConfig) -> Self {
        Self {
            hidden_email_domain: config.hidden_email_domain.clone(),
            password_length: config.password_length,
            creation_delay: None,
        }
    }
}
