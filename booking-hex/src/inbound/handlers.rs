//! HTTP request handlers.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use booking_types::{
    AppError, BookingStore, CreateOrderRequest, PaymentGateway, RazorpayKeyResponse,
    SaveBookingRequest, VerifyPaymentRequest,
};

use crate::BookingService;

/// Liveness text served on `/`.
pub const LIVENESS_TEXT: &str = "Backend is running 🚀";

/// Application state shared across handlers.
pub struct AppState<G: PaymentGateway, S: BookingStore> {
    pub service: BookingService<G, S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Only input errors and store messages are echoed back to the client.
        let (status, error, message) = match self.0 {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::SignatureMismatch => {
                (StatusCode::BAD_REQUEST, "Invalid signature".to_string(), None)
            }
            AppError::Config(msg) => {
                tracing::error!(detail = %msg, "Server configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                    None,
                )
            }
            AppError::Gateway(msg) => {
                tracing::error!(detail = %msg, "Payment gateway error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create order".to_string(),
                    None,
                )
            }
            AppError::Persistence(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save booking".to_string(),
                Some(msg),
            ),
            AppError::Internal(msg) => {
                tracing::error!(detail = %msg, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut body = serde_json::json!({
            "success": false,
            "error": error,
            "code": status.as_u16()
        });
        if let Some(message) = message {
            body["message"] = serde_json::Value::String(message);
        }

        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into a generic 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError(AppError::Internal(detail)).into_response()
}

/// Plaintext liveness probe.
pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Public gateway key for the checkout widget.
pub async fn razorpay_key<G: PaymentGateway, S: BookingStore>(
    State(state): State<Arc<AppState<G, S>>>,
) -> Json<RazorpayKeyResponse> {
    Json(RazorpayKeyResponse {
        key: state.service.public_key().map(str::to_string),
    })
}

/// Create a payment order.
#[tracing::instrument(skip(state, payload))]
pub async fn create_order<G: PaymentGateway, S: BookingStore>(
    State(state): State<Arc<AppState<G, S>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let order = state.service.create_order(req).await?;
    Ok(Json(order))
}

/// Verify a payment signature.
#[tracing::instrument(skip(state, payload))]
pub async fn verify_payment<G: PaymentGateway, S: BookingStore>(
    State(state): State<Arc<AppState<G, S>>>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let verified = state.service.verify_payment(req)?;
    Ok(Json(verified))
}

/// Record a paid booking.
#[tracing::instrument(skip(state, payload))]
pub async fn save_booking<G: PaymentGateway, S: BookingStore>(
    State(state): State<Arc<AppState<G, S>>>,
    payload: Result<Json<SaveBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let saved = state.service.save_booking(req).await?;
    Ok(Json(saved))
}
