//! Shared fixtures for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response},
};
use http_body_util::BodyExt;
use secrecy::Secret;
use tower::ServiceExt;

use booking_hex::{BookingService, ServiceSettings, inbound::HttpServer};
use booking_types::{
    BookingRecord, BookingStore, GatewayError, NewOrder, Order, PaymentGateway, StoreAck,
    StoreError,
};

pub const SECRET: &str = "integration_secret";
pub const KEY_ID: &str = "rzp_test_integration";

#[derive(Default)]
pub struct RecordingGateway {
    pub orders: Mutex<Vec<NewOrder>>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_order(&self, order: NewOrder) -> Result<Order, GatewayError> {
        self.orders.lock().unwrap().push(order.clone());
        if self.fail {
            return Err(GatewayError::Request("gateway down".into()));
        }
        let mut extra = serde_json::Map::new();
        extra.insert("entity".into(), serde_json::json!("order"));
        Ok(Order {
            id: "order_it_1".into(),
            amount: order.amount.amount(),
            currency: "INR".into(),
            receipt: Some(order.receipt),
            status: "created".into(),
            extra,
        })
    }
}

/// Gateway whose order call panics, leaking a secret in the panic text.
pub struct PanickingGateway;

pub const PANIC_DETAIL: &str = "gateway exploded with key sk_live_leak";

#[async_trait]
impl PaymentGateway for PanickingGateway {
    async fn create_order(&self, _order: NewOrder) -> Result<Order, GatewayError> {
        panic!("{}", PANIC_DETAIL)
    }
}

#[derive(Default)]
pub struct RecordingStore {
    pub rows: Mutex<Vec<BookingRecord>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl BookingStore for RecordingStore {
    async fn insert(&self, _table: &str, record: &BookingRecord) -> Result<StoreAck, StoreError> {
        if let Some(msg) = &self.fail_with {
            return Err(StoreError::Rejected(msg.clone()));
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(StoreAck {
            rows: vec![serde_json::json!({ "id": 1 })],
        })
    }
}

pub fn settings() -> ServiceSettings {
    ServiceSettings {
        key_id: Some(KEY_ID.to_string()),
        key_secret: Some(Secret::new(SECRET.to_string())),
        ..Default::default()
    }
}

pub fn app<G: PaymentGateway>(gateway: G, store: RecordingStore, settings: ServiceSettings) -> Router {
    HttpServer::new(BookingService::new(gateway, store, settings)).router()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn booking_payload() -> serde_json::Value {
    serde_json::json!({
        "customer": {
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "address": "12 MG Road",
            "city": "Pune"
        },
        "services": ["deep-clean"],
        "booking": { "year": 2025, "month": 0, "date": 15, "time": "10:00 AM" },
        "totalAmount": 500,
        "paymentId": "pay_it_1"
    })
}
