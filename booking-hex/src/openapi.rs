//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use axum::Json;
use booking_types::domain::Currency;
use booking_types::dto::{
    BookingInput, CreateOrderRequest, CustomerInput, PaymentInput, RazorpayKeyResponse,
    SaveBookingRequest, SaveBookingResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain")
    )
)]
async fn liveness() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Public gateway key for the checkout widget
#[utoipa::path(
    get,
    path = "/get-razorpay-key",
    tag = "checkout",
    responses(
        (status = 200, description = "Public key id", body = RazorpayKeyResponse)
    )
)]
async fn get_razorpay_key() {}

/// Create a payment order
#[utoipa::path(
    post,
    path = "/create-order",
    tag = "checkout",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Gateway order descriptor, relayed unchanged", body = inline(serde_json::Value),
            example = json!({"id": "order_EKwxwAgItmmXdp", "amount": 50000, "currency": "INR", "receipt": "receipt_1700000000000", "status": "created"})),
        (status = 400, description = "Amount missing or not positive"),
        (status = 500, description = "Gateway error")
    )
)]
async fn create_order() {}

/// Verify a payment signature
#[utoipa::path(
    post,
    path = "/verify-payment",
    tag = "checkout",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Signature valid", body = VerifyPaymentResponse),
        (status = 400, description = "Signature mismatch or missing field"),
        (status = 500, description = "Signing secret not configured")
    )
)]
async fn verify_payment() {}

/// Record a paid booking
#[utoipa::path(
    post,
    path = "/save-booking",
    tag = "bookings",
    request_body = SaveBookingRequest,
    responses(
        (status = 200, description = "Booking stored", body = SaveBookingResponse),
        (status = 400, description = "Invalid booking payload or date"),
        (status = 500, description = "Store rejected the insert")
    )
)]
async fn save_booking() {}

/// OpenAPI documentation for the booking checkout API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booking Checkout API",
        version = "1.0.0",
        description = "Creates payment orders, verifies payment signatures and records paid bookings.\n\nThe client drives the flow: `/create-order`, then checkout, then `/verify-payment`, then `/save-booking`.",
        license(name = "MIT"),
    ),
    paths(
        liveness,
        health,
        get_razorpay_key,
        create_order,
        verify_payment,
        save_booking,
    ),
    components(
        schemas(
            CreateOrderRequest,
            RazorpayKeyResponse,
            VerifyPaymentRequest,
            VerifyPaymentResponse,
            CustomerInput,
            BookingInput,
            PaymentInput,
            SaveBookingRequest,
            SaveBookingResponse,
            Currency,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "checkout", description = "Order creation and payment verification"),
        (name = "bookings", description = "Booking persistence"),
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
