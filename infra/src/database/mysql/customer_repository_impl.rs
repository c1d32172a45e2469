//! MySQL implementation of the CustomerIdentityRepository trait.
//!
//! Uniqueness of phone, platform customer id and hidden email is enforced by
//! the table's unique keys; a violation comes back as `DomainError::Conflict`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pb_core::domain::entities::CustomerIdentity;
use pb_core::errors::DomainError;
use pb_core::repositories::CustomerIdentityRepository;

use super::{map_read_error, map_write_error};

/// MySQL implementation of CustomerIdentityRepository
pub struct MySqlCustomerIdentityRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCustomerIdentityRepository {
    /// Create a new MySQL identity repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to CustomerIdentity entity
    fn row_to_identity(row: &sqlx::mysql::MySqlRow) -> Result<CustomerIdentity, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;

        Ok(CustomerIdentity {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid identity UUID: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| column("phone", e))?,
            platform_customer_id: row
                .try_get("platform_customer_id")
                .map_err(|e| column("platform_customer_id", e))?,
            hidden_email: row.try_get("hidden_email").map_err(|e| column("hidden_email", e))?,
            hidden_password: row
                .try_get("hidden_password")
                .map_err(|e| column("hidden_password", e))?,
            first_name: row.try_get("first_name").map_err(|e| column("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| column("last_name", e))?,
            is_active: row.try_get("is_active").map_err(|e| column("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

#[async_trait]
impl CustomerIdentityRepository for MySqlCustomerIdentityRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerIdentity>, DomainError> {
        let query = r#"
            SELECT id, phone, platform_customer_id, hidden_email, hidden_password,
                   first_name, last_name, is_active, created_at, updated_at
            FROM customer_identities
            WHERE phone = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error("Failed to find customer identity", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_identity(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, identity: CustomerIdentity) -> Result<CustomerIdentity, DomainError> {
        let query = r#"
            INSERT INTO customer_identities (
                id, phone, platform_customer_id, hidden_email, hidden_password,
                first_name, last_name, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(identity.id.to_string())
            .bind(&identity.phone)
            .bind(&identity.platform_customer_id)
            .bind(&identity.hidden_email)
            .bind(&identity.hidden_password)
            .bind(&identity.first_name)
            .bind(&identity.last_name)
            .bind(identity.is_active)
            .bind(identity.created_at)
            .bind(identity.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to save customer identity", e))?;

        Ok(identity)
    }

    async fn update(&self, identity: CustomerIdentity) -> Result<CustomerIdentity, DomainError> {
        let query = r#"
            UPDATE customer_identities
            SET hidden_password = ?, first_name = ?, last_name = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&identity.hidden_password)
            .bind(&identity.first_name)
            .bind(&identity.last_name)
            .bind(identity.is_active)
            .bind(identity.updated_at)
            .bind(identity.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to update customer identity", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "CustomerIdentity".to_string(),
            });
        }

        Ok(identity)
    }
}
