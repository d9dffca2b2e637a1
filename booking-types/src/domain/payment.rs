//! Payment claims submitted by the client after checkout.

use crate::error::DomainError;

/// Unverified assertion that an order was paid.
///
/// Lives only for the duration of one verification call.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentClaim {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl PaymentClaim {
    /// Builds a claim, rejecting missing or blank fields.
    pub fn new(
        order_id: Option<String>,
        payment_id: Option<String>,
        signature: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            order_id: required("razorpay_order_id", order_id)?,
            payment_id: required("razorpay_payment_id", payment_id)?,
            signature: required("razorpay_signature", signature)?,
        })
    }

    /// The exact byte string the gateway signs: `order_id|payment_id`.
    pub fn signed_payload(&self) -> String {
        signed_payload(&self.order_id, &self.payment_id)
    }
}

// Keep the signature out of logs.
impl std::fmt::Debug for PaymentClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentClaim")
            .field("order_id", &self.order_id)
            .field("payment_id", &self.payment_id)
            .field("signature", &"<redacted>")
            .finish()
    }
}

/// Joins an order id and payment id with the literal `|` separator.
pub fn signed_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

fn required(field: &str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::ValidationError(format!("{} is required", field))),
    }
}
