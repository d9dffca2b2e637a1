//! Persistence store port.

use serde::{Deserialize, Serialize};

use crate::domain::BookingRecord;
use crate::error::StoreError;

/// Acknowledgement of an insert.
///
/// `rows` holds whatever the store echoes back; it may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreAck {
    pub rows: Vec<serde_json::Value>,
}

/// Inserts booking rows.
#[async_trait::async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Inserts exactly one row into `table`.
    async fn insert(&self, table: &str, record: &BookingRecord) -> Result<StoreAck, StoreError>;
}
