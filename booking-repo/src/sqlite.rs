//! SQLite store adapter for local development.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;
use uuid::Uuid;

use booking_types::{BookingRecord, BookingStore, StoreAck, StoreError};

use crate::validate_table;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store implementation.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // A single connection keeps `sqlite::memory:` databases shared.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let ddl = include_str!("../migrations/0001_create_bookings.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for SqliteStore {
    #[tracing::instrument(skip(self, record), fields(payment_id = %record.payment_id))]
    async fn insert(&self, table: &str, record: &BookingRecord) -> Result<StoreAck, StoreError> {
        validate_table(table)?;

        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let services = serde_json::to_string(&record.services)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let sql = format!(
            r#"INSERT INTO {} (
                id, user_id, customer_name, customer_email, customer_phone, customer_address,
                customer_city, customer_zip, customer_message, services, booking_date,
                booking_time, total_amount, payment_id, razorpay_order_id, payment_method,
                payment_status, payment_verified, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            table
        );

        sqlx::query(&sql)
            .bind(&id)
            .bind(&record.user_id)
            .bind(&record.customer_name)
            .bind(&record.customer_email)
            .bind(&record.customer_phone)
            .bind(&record.customer_address)
            .bind(&record.customer_city)
            .bind(&record.customer_zip)
            .bind(&record.customer_message)
            .bind(&services)
            .bind(record.booking_date.to_string())
            .bind(&record.booking_time)
            .bind(record.total_amount)
            .bind(&record.payment_id)
            .bind(&record.razorpay_order_id)
            .bind(&record.payment_method)
            .bind(record.payment_status.to_string())
            .bind(record.payment_verified)
            .bind(&created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let mut row = serde_json::to_value(record).map_err(|e| StoreError::Rejected(e.to_string()))?;
        if let Some(obj) = row.as_object_mut() {
            obj.insert("id".into(), serde_json::Value::String(id));
            obj.insert("created_at".into(), serde_json::Value::String(created_at));
        }

        Ok(StoreAck { rows: vec![row] })
    }
}
