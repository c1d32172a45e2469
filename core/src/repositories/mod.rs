pub mod challenge;
pub mod customer;

pub use challenge::{InMemoryOtpChallengeRepository, OtpChallengeRepository};
pub use customer::{CustomerIdentityRepository, InMemoryCustomerIdentityRepository};
