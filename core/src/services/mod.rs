//! Business services containing domain logic and use cases.

pub mod auth;
pub mod bridge;
pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, SendOtpResult, VerifyOtpResult};
pub use bridge::{
    BridgeConfig, BridgeOutcome, CommerceAdminApi, CredentialBridge, CustomerAccessToken,
    NewPlatformCustomer, PlatformCustomer, StorefrontApi,
};
pub use rate_limit::{RateLimitDecision, SlidingWindowRateLimiter};
pub use verification::{
    DeliveryStatus, IssuedChallenge, OtpService, OtpServiceConfig, SmsServiceTrait,
};
