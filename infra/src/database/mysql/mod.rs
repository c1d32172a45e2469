//! MySQL repository implementations

mod challenge_repository_impl;
mod customer_repository_impl;

pub use challenge_repository_impl::MySqlOtpChallengeRepository;
pub use customer_repository_impl::MySqlCustomerIdentityRepository;

use pb_core::errors::DomainError;

/// Map a write failure, turning unique-key violations into conflicts
pub(crate) fn map_write_error(context: &str, err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::Conflict {
            message: format!("{}: {}", context, db_err.message()),
        },
        _ => DomainError::Internal {
            message: format!("{}: {}", context, err),
        },
    }
}

/// Map a read failure
pub(crate) fn map_read_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, err),
    }
}
