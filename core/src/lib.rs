//! # PhoneBridge Core
//!
//! Core business logic for phone-number login bridged onto storefront
//! customer accounts. This crate contains the domain entities, the OTP
//! challenge engine, the sliding-window rate limiter, the credential bridge
//! and the orchestrator that sequences them, plus the repository and
//! collaborator traits the infrastructure layer implements.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
