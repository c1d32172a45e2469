//! Database connection pool management
//!
//! Connection pooling using SQLx with MySQL, plus the idempotent schema
//! bootstrap for the two tables the record store needs.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;

use pb_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Schema statements, applied in order; each is safe to re-run
pub const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS otp_challenges (
        id CHAR(36) NOT NULL PRIMARY KEY,
        phone VARCHAR(20) NOT NULL,
        code VARCHAR(10) NOT NULL,
        session_id VARCHAR(64) NOT NULL,
        verified BOOLEAN NOT NULL DEFAULT FALSE,
        attempts INT NOT NULL DEFAULT 0,
        created_at DATETIME(6) NOT NULL,
        expires_at DATETIME(6) NOT NULL,
        verified_at DATETIME(6) NULL,
        UNIQUE KEY uq_otp_challenges_session_id (session_id),
        KEY idx_otp_challenges_phone (phone)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customer_identities (
        id CHAR(36) NOT NULL PRIMARY KEY,
        phone VARCHAR(20) NOT NULL,
        platform_customer_id VARCHAR(255) NOT NULL,
        hidden_email VARCHAR(255) NOT NULL,
        hidden_password VARCHAR(255) NOT NULL,
        first_name VARCHAR(255) NULL,
        last_name VARCHAR(255) NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_customer_identities_phone (phone),
        UNIQUE KEY uq_customer_identities_platform_id (platform_customer_id),
        UNIQUE KEY uq_customer_identities_hidden_email (hidden_email)
    )
    "#,
];

/// Database connection pool wrapper
///
/// Manages the MySQL connection pool with configurable settings
/// for connection limits, timeouts, and health checks.
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx MySQL connection pool
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `config` - Database configuration settings
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            "Creating database connection pool with max_connections: {}",
            config.max_connections
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create the record store tables when missing
    pub async fn bootstrap_schema(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Bootstrapping database schema");

        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}
