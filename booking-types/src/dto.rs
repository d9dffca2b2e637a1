//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names follow the booking frontend's JSON exactly.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookingSlot, Customer, PaymentReference};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Order DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Amount in rupees (major units). Numeric strings such as `"500"` are accepted.
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    #[schema(example = 500)]
    pub amount: Option<f64>,
}

/// Form-driven clients send amounts either as JSON numbers or as strings.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAmount::Number(amount)) => Ok(Some(amount)),
        Some(RawAmount::Text(text)) => text.trim().parse::<f64>().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("amount must be a number, got {:?}", text))
        }),
    }
}

/// Public gateway key for the checkout widget.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RazorpayKeyResponse {
    #[schema(example = "rzp_test_1DP5mmOlF5G5ag")]
    pub key: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Verification DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Payment claim returned by the checkout widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    #[schema(example = "order_EKwxwAgItmmXdp")]
    pub razorpay_order_id: Option<String>,
    #[schema(example = "pay_29QQoUBi66xm2f")]
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    /// Short-lived token binding this verification to a later booking
    #[serde(
        rename = "verificationToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub verification_token: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Booking DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Customer details as entered in the booking form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[schema(example = "Asha")]
    pub first_name: String,
    #[schema(example = "Rao")]
    pub last_name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<CustomerInput> for Customer {
    fn from(input: CustomerInput) -> Self {
        Customer {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            city: input.city,
            zip: input.zip,
            message: input.message,
        }
    }
}

/// Selected slot. `month` is 0-indexed (January = 0).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingInput {
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 0)]
    pub month: u32,
    /// Day of month
    #[serde(alias = "day")]
    #[schema(example = 15)]
    pub date: u32,
    #[schema(example = "10:00 AM")]
    pub time: String,
}

impl TryFrom<BookingInput> for BookingSlot {
    type Error = DomainError;

    fn try_from(input: BookingInput) -> Result<Self, Self::Error> {
        BookingSlot::from_zero_indexed(input.year, input.month, input.date, input.time)
    }
}

/// Payment reference sent as an object instead of a bare `paymentId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    #[serde(default, alias = "razorpay_order_id")]
    pub order_id: Option<String>,
    #[serde(default, alias = "razorpay_payment_id")]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Request to record a completed booking.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveBookingRequest {
    pub customer: CustomerInput,
    /// Ordered list of booked services (identifiers or descriptor objects)
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub services: Vec<serde_json::Value>,
    pub booking: BookingInput,
    #[schema(example = 500)]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
}

impl SaveBookingRequest {
    /// Resolves the payment reference from either `payment` or `paymentId`.
    ///
    /// Ids inside `payment` win over the top-level `paymentId`.
    pub fn payment_reference(&self) -> Result<PaymentReference, DomainError> {
        let payment = self.payment.clone().unwrap_or_default();
        PaymentReference::new(
            payment.order_id,
            payment.payment_id.or_else(|| self.payment_id.clone()),
            payment.method,
        )
    }
}

/// Acknowledgement of a stored booking.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveBookingResponse {
    pub success: bool,
    /// Rows echoed back by the store, if any
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
}
