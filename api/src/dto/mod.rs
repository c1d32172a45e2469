//! Request and response bodies

pub mod auth;
pub mod customer;

pub use auth::{CustomerData, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
pub use customer::{CustomerExistsResponse, PhoneQuery};
