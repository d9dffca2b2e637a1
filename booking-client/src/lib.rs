//! # Booking Client SDK
//!
//! A typed Rust client for the booking checkout API.
//!
//! The checkout flow is driven from the client side:
//! [`BookingClient::create_order`], then the gateway's checkout widget, then
//! [`BookingClient::verify_payment`] and finally [`BookingClient::save_booking`].

use booking_types::{
    CreateOrderRequest, Order, RazorpayKeyResponse, SaveBookingRequest, SaveBookingResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Booking checkout API client.
pub struct BookingClient {
    base_url: String,
    http: Client,
}

impl BookingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Uses a preconfigured reqwest client (timeouts, proxies).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Fetches the plaintext liveness banner.
    pub async fn liveness(&self) -> Result<String, ClientError> {
        let resp = self.http.get(format!("{}/", self.base_url)).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }

    /// Public gateway key for the checkout widget, if the server has one.
    pub async fn razorpay_key(&self) -> Result<Option<String>, ClientError> {
        let resp: RazorpayKeyResponse = self.get("/get-razorpay-key").await?;
        Ok(resp.key)
    }

    /// Creates a gateway order for an amount in rupees.
    pub async fn create_order(&self, amount: f64) -> Result<Order, ClientError> {
        let req = CreateOrderRequest {
            amount: Some(amount),
        };
        self.post("/create-order", &req).await
    }

    /// Submits the identifiers and signature returned by the checkout widget.
    pub async fn verify_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<VerifyPaymentResponse, ClientError> {
        let req = VerifyPaymentRequest {
            razorpay_order_id: Some(order_id.to_string()),
            razorpay_payment_id: Some(payment_id.to_string()),
            razorpay_signature: Some(signature.to_string()),
        };
        self.post("/verify-payment", &req).await
    }

    /// Records a paid booking.
    pub async fn save_booking(
        &self,
        booking: &SaveBookingRequest,
    ) -> Result<SaveBookingResponse, ClientError> {
        self.post("/save-booking", booking).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// Pulls `error` (and the store's `message`, when present) out of an error body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    let error = value.get("error").and_then(|e| e.as_str());
    let detail = value.get("message").and_then(|m| m.as_str());
    match (error, detail) {
        (Some(error), Some(detail)) => format!("{}: {}", error, detail),
        (Some(error), None) => error.to_string(),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = BookingClient::new("http://localhost:10000");
        assert_eq!(client.base_url, "http://localhost:10000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = BookingClient::new("http://localhost:10000/");
        assert_eq!(client.base_url, "http://localhost:10000");
    }

    #[test]
    fn test_error_message_joins_store_detail() {
        let body = r#"{"success":false,"error":"Failed to save booking","message":"duplicate key","code":500}"#;
        assert_eq!(error_message(body), "Failed to save booking: duplicate key");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }

    #[tokio::test]
    async fn test_create_order_sends_rupees() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/create-order"))
            .and(body_json(serde_json::json!({ "amount": 500.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "order_1",
                "amount": 50000,
                "currency": "INR",
                "receipt": "receipt_1",
                "status": "created"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BookingClient::new(server.uri());
        let order = client.create_order(500.0).await.unwrap();
        assert_eq!(order.id, "order_1");
        assert_eq!(order.amount, 50000);
    }

    #[tokio::test]
    async fn test_rejected_signature_surfaces_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify-payment"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "success": false,
                "error": "Invalid signature",
                "code": 400
            })))
            .mount(&server)
            .await;

        let client = BookingClient::new(server.uri());
        let err = client
            .verify_payment("order_1", "pay_1", "bad")
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid signature");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get-razorpay-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "key": null })))
            .mount(&server)
            .await;

        let client = BookingClient::new(server.uri());
        assert_eq!(client.razorpay_key().await.unwrap(), None);
    }
}
