//! MySQL implementation of the OtpChallengeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pb_core::domain::entities::OtpChallenge;
use pb_core::errors::DomainError;
use pb_core::repositories::OtpChallengeRepository;

use super::{map_read_error, map_write_error};

const SELECT_COLUMNS: &str = r#"
    SELECT id, phone, code, session_id, verified, attempts,
           created_at, expires_at, verified_at
    FROM otp_challenges
"#;

/// Forward-only write of the mutable columns; a stale read can neither clear
/// `verified` nor lower `attempts`.
const UPDATE_CHALLENGE: &str = r#"
    UPDATE otp_challenges
    SET verified = verified OR ?,
        attempts = GREATEST(attempts, ?),
        verified_at = COALESCE(verified_at, ?)
    WHERE session_id = ?
"#;

/// MySQL implementation of OtpChallengeRepository
pub struct MySqlOtpChallengeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpChallengeRepository {
    /// Create a new MySQL challenge repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to OtpChallenge entity
    fn row_to_challenge(row: &sqlx::mysql::MySqlRow) -> Result<OtpChallenge, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;
        let attempts: i32 = row.try_get("attempts").map_err(|e| column("attempts", e))?;

        Ok(OtpChallenge {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid challenge UUID: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| column("phone", e))?,
            code: row.try_get("code").map_err(|e| column("code", e))?,
            session_id: row.try_get("session_id").map_err(|e| column("session_id", e))?,
            verified: row.try_get("verified").map_err(|e| column("verified", e))?,
            attempts: attempts.max(0) as u32,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column("expires_at", e))?,
            verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verified_at")
                .map_err(|e| column("verified_at", e))?,
        })
    }
}

#[async_trait]
impl OtpChallengeRepository for MySqlOtpChallengeRepository {
    async fn create(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        let query = r#"
            INSERT INTO otp_challenges (
                id, phone, code, session_id, verified, attempts,
                created_at, expires_at, verified_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(challenge.id.to_string())
            .bind(&challenge.phone)
            .bind(&challenge.code)
            .bind(&challenge.session_id)
            .bind(challenge.verified)
            .bind(challenge.attempts as i32)
            .bind(challenge.created_at)
            .bind(challenge.expires_at)
            .bind(challenge.verified_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to save OTP challenge", e))?;

        Ok(challenge)
    }

    async fn find_by_phone_and_session(
        &self,
        phone: &str,
        session_id: &str,
    ) -> Result<Option<OtpChallenge>, DomainError> {
        let query = format!("{} WHERE phone = ? AND session_id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(phone)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to find OTP challenge", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_challenge(&row)?)),
            None => Ok(None),
        }
    }

    async fn invalidate_pending(&self, phone: &str) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE otp_challenges
            SET verified = TRUE
            WHERE phone = ? AND verified = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to invalidate OTP challenges", e))?;

        Ok(result.rows_affected())
    }

    async fn update(&self, challenge: OtpChallenge) -> Result<OtpChallenge, DomainError> {
        sqlx::query(UPDATE_CHALLENGE)
            .bind(challenge.verified)
            .bind(challenge.attempts as i32)
            .bind(challenge.verified_at)
            .bind(&challenge.session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to update OTP challenge", e))?;

        // Read back: the stored row may be ahead of what this caller saw.
        let query = format!("{} WHERE session_id = ?", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(&challenge.session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to reload OTP challenge", e))?
            .ok_or_else(|| DomainError::NotFound {
                resource: "OtpChallenge".to_string(),
            })?;

        Self::row_to_challenge(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_is_forward_only() {
        assert!(UPDATE_CHALLENGE.contains("verified = verified OR ?"));
        assert!(UPDATE_CHALLENGE.contains("attempts = GREATEST(attempts, ?)"));
        assert!(UPDATE_CHALLENGE.contains("verified_at = COALESCE(verified_at, ?)"));
    }
}
