//! Booking domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Payment method recorded when the client does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "razorpay";

/// The person the booking is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub message: Option<String>,
}

impl Customer {
    /// `"<first> <last>"`, as stored in the `customer_name` column.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Date and time the service is scheduled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSlot {
    pub date: NaiveDate,
    pub time: String,
}

impl BookingSlot {
    /// Builds a slot from a calendar picker value whose month is 0-indexed
    /// (January = 0).
    ///
    /// # Validation
    /// - month must be in `0..=11`
    /// - the day must exist in that month (no 31st of April, no 29th of
    ///   February outside leap years)
    pub fn from_zero_indexed(
        year: i32,
        month: u32,
        day: u32,
        time: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if month > 11 {
            return Err(DomainError::InvalidDate(format!(
                "month {} is out of range 0-11",
                month
            )));
        }

        let date = NaiveDate::from_ymd_opt(year, month + 1, day).ok_or_else(|| {
            DomainError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month + 1, day))
        })?;

        Ok(Self {
            date,
            time: time.into(),
        })
    }
}

/// Reference to the gateway payment that paid for a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReference {
    pub order_id: Option<String>,
    pub payment_id: String,
    pub method: String,
}

impl PaymentReference {
    pub fn new(
        order_id: Option<String>,
        payment_id: Option<String>,
        method: Option<String>,
    ) -> Result<Self, DomainError> {
        let payment_id = payment_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| DomainError::ValidationError("paymentId is required".into()))?;

        Ok(Self {
            order_id: order_id.filter(|id| !id.trim().is_empty()),
            payment_id,
            method: method
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        })
    }
}

/// Payment state written with the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
}

impl AsRef<str> for PaymentStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// One row of the `bookings` table.
///
/// Field names are the store's column names. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_city: Option<String>,
    pub customer_zip: Option<String>,
    pub customer_message: Option<String>,
    pub services: Vec<serde_json::Value>,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub total_amount: f64,
    pub payment_id: String,
    pub razorpay_order_id: Option<String>,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub payment_verified: bool,
}

impl BookingRecord {
    /// Builds a record for a booking whose payment the caller reports as done.
    ///
    /// # Validation
    /// - total amount must be a finite, non-negative number
    pub fn paid(
        customer: Customer,
        services: Vec<serde_json::Value>,
        slot: BookingSlot,
        total_amount: f64,
        payment: PaymentReference,
        user_id: Option<String>,
    ) -> Result<Self, DomainError> {
        if !total_amount.is_finite() || total_amount < 0.0 {
            return Err(DomainError::ValidationError(
                "totalAmount must be a non-negative number".into(),
            ));
        }

        Ok(Self {
            user_id,
            customer_name: customer.full_name(),
            customer_email: customer.email,
            customer_phone: customer.phone,
            customer_address: customer.address,
            customer_city: customer.city,
            customer_zip: customer.zip,
            customer_message: customer.message,
            services,
            booking_date: slot.date,
            booking_time: slot.time,
            total_amount,
            payment_id: payment.payment_id,
            razorpay_order_id: payment.order_id,
            payment_method: payment.method,
            payment_status: PaymentStatus::Paid,
            payment_verified: true,
        })
    }
}
