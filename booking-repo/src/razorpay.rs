//! Razorpay Orders API adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use booking_types::{GatewayError, NewOrder, Order, PaymentGateway};

/// Default Razorpay REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Credentials and endpoint for the Razorpay API.
#[derive(Clone, Debug)]
pub struct RazorpaySettings {
    pub key_id: Option<String>,
    pub key_secret: Option<SecretString>,
    pub api_base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for RazorpaySettings {
    fn default() -> Self {
        Self {
            key_id: None,
            key_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Payment gateway backed by Razorpay's Orders API.
pub struct RazorpayGateway {
    client: Client,
    settings: RazorpaySettings,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    error: RazorpayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetail {
    code: String,
    description: String,
}

impl RazorpayGateway {
    /// Creates a gateway client. Credentials are checked per call, not here.
    pub fn new(settings: RazorpaySettings) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    /// Whether both key id and secret are set.
    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    fn credentials(&self) -> Result<(&str, &str), GatewayError> {
        match (&self.settings.key_id, &self.settings.key_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.expose_secret().is_empty() => {
                Ok((id.as_str(), secret.expose_secret().as_str()))
            }
            _ => Err(GatewayError::NotConfigured),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    #[tracing::instrument(skip(self, order), fields(amount = order.amount.amount(), receipt = %order.receipt))]
    async fn create_order(&self, order: NewOrder) -> Result<Order, GatewayError> {
        let (key_id, key_secret) = self.credentials()?;

        let body = CreateOrderBody {
            amount: order.amount.amount(),
            currency: order.amount.currency().code(),
            receipt: &order.receipt,
        };

        let url = format!(
            "{}/orders",
            self.settings.api_base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(key_id, Some(key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        tracing::debug!(status = %status, "Razorpay create_order response");

        if status.is_success() {
            let created: Order =
                serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?;
            tracing::info!(order_id = %created.id, amount = created.amount, "Razorpay order created");
            Ok(created)
        } else {
            let (code, description) = match serde_json::from_str::<RazorpayErrorBody>(&text) {
                Ok(body) => (body.error.code, body.error.description),
                Err(_) => (status.as_u16().to_string(), text),
            };
            tracing::error!(code = %code, description = %description, "Razorpay order creation failed");
            Err(GatewayError::Rejected { code, description })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_types::{Currency, Money};
    use secrecy::Secret;
    use wiremock::matchers::{basic_auth, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base: &str) -> RazorpaySettings {
        RazorpaySettings {
            key_id: Some("rzp_test_123".to_string()),
            key_secret: Some(Secret::new("test_secret".to_string())),
            api_base_url: base.to_string(),
            timeout: None,
        }
    }

    fn new_order(minor: i64) -> NewOrder {
        NewOrder {
            amount: Money::new(minor, Currency::INR).unwrap(),
            receipt: "receipt_1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_order_sends_minor_units_and_inr() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(basic_auth("rzp_test_123", "test_secret"))
            .and(body_partial_json(serde_json::json!({
                "amount": 50000,
                "currency": "INR",
                "receipt": "receipt_1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "order_abc",
                "entity": "order",
                "amount": 50000,
                "currency": "INR",
                "receipt": "receipt_1",
                "status": "created"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = RazorpayGateway::new(settings(&server.uri())).unwrap();
        let order = gateway.create_order(new_order(50_000)).await.unwrap();

        assert_eq!(order.id, "order_abc");
        assert_eq!(order.amount, 50_000);
        assert_eq!(order.extra["entity"], "order");
    }

    #[tokio::test]
    async fn test_create_order_surfaces_gateway_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": "BAD_REQUEST_ERROR",
                    "description": "Order amount less than minimum amount allowed"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = RazorpayGateway::new(settings(&server.uri())).unwrap();
        let err = gateway.create_order(new_order(10)).await.unwrap_err();

        match err {
            GatewayError::Rejected { code, .. } => assert_eq!(code, "BAD_REQUEST_ERROR"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_order_without_credentials_does_not_call_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gateway = RazorpayGateway::new(RazorpaySettings {
            api_base_url: server.uri(),
            ..Default::default()
        })
        .unwrap();

        assert!(!gateway.is_configured());
        let err = gateway.create_order(new_order(100)).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured));
    }
}
