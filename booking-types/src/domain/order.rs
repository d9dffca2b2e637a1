//! Gateway order model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// An order the gateway is asked to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Amount (minor units) and currency to charge
    pub amount: Money,
    /// Merchant-side receipt label, unique per order
    pub receipt: String,
}

impl NewOrder {
    /// Creates an order request with a receipt derived from `now`.
    pub fn new(amount: Money, now: DateTime<Utc>) -> Self {
        Self {
            amount,
            receipt: receipt_label(now),
        }
    }
}

/// Receipt label in the form `receipt_<unix millis>`.
pub fn receipt_label(now: DateTime<Utc>) -> String {
    format!("receipt_{}", now.timestamp_millis())
}

/// Order descriptor as returned by the payment gateway.
///
/// Owned by the gateway; this service only relays it. Fields the gateway
/// returns beyond the ones named here are kept in `extra` so the descriptor
/// is passed back to the client unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
