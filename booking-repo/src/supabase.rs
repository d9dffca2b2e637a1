//! Supabase (PostgREST) store adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use booking_types::{BookingRecord, BookingStore, StoreAck, StoreError};

use crate::validate_table;

/// Project URL and service-role key.
#[derive(Clone, Debug)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_key: SecretString,
    pub timeout: Option<Duration>,
}

/// Store that inserts rows through Supabase's REST interface.
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    service_key: SecretString,
}

/// PostgREST error payload.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

impl SupabaseStore {
    pub fn new(settings: SupabaseSettings) -> anyhow::Result<Self> {
        if settings.url.trim().is_empty() {
            anyhow::bail!("Supabase URL must not be empty");
        }

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            rest_url: format!("{}/rest/v1", settings.url.trim_end_matches('/')),
            service_key: settings.service_key,
        })
    }
}

#[async_trait]
impl BookingStore for SupabaseStore {
    #[tracing::instrument(skip(self, record), fields(payment_id = %record.payment_id))]
    async fn insert(&self, table: &str, record: &BookingRecord) -> Result<StoreAck, StoreError> {
        validate_table(table)?;

        let key = self.service_key.expose_secret();
        let response = self
            .client
            .post(format!("{}/{}", self.rest_url, table))
            .header("apikey", key.as_str())
            .bearer_auth(key)
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<PostgrestError>(&text)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, text));
            tracing::error!(status = %status, message = %message, "Supabase insert failed");
            return Err(StoreError::Rejected(message));
        }

        let rows = if text.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&text).map_err(|e| StoreError::Rejected(e.to_string()))?
        };

        tracing::info!(table, "Booking row inserted");
        Ok(StoreAck { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_types::{BookingSlot, Customer, PaymentReference};
    use secrecy::Secret;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(url: &str) -> SupabaseStore {
        SupabaseStore::new(SupabaseSettings {
            url: url.to_string(),
            service_key: Secret::new("service-role-key".to_string()),
            timeout: None,
        })
        .unwrap()
    }

    fn record() -> BookingRecord {
        BookingRecord::paid(
            Customer {
                first_name: "Asha".into(),
                last_name: "Rao".into(),
                email: "asha@example.com".into(),
                phone: "9876543210".into(),
                address: "12 MG Road".into(),
                city: None,
                zip: None,
                message: None,
            },
            vec![serde_json::json!("deep-clean")],
            BookingSlot::from_zero_indexed(2025, 0, 15, "10:00 AM").unwrap(),
            500.0,
            PaymentReference::new(None, Some("pay_1".into()), None).unwrap(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_posts_one_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/bookings"))
            .and(header("apikey", "service-role-key"))
            .and(header("Authorization", "Bearer service-role-key"))
            .and(header("Prefer", "return=representation"))
            .and(body_partial_json(serde_json::json!([{
                "customer_name": "Asha Rao",
                "booking_date": "2025-01-15",
                "payment_status": "paid",
                "payment_verified": true
            }])))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!([{ "id": 1, "payment_id": "pay_1" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ack = store(&server.uri()).insert("bookings", &record()).await.unwrap();
        assert_eq!(ack.rows.len(), 1);
        assert_eq!(ack.rows[0]["id"], 1);
    }

    #[tokio::test]
    async fn test_insert_error_keeps_store_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/bookings"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": "23502",
                "message": "null value in column \"customer_phone\" violates not-null constraint"
            })))
            .mount(&server)
            .await;

        let err = store(&server.uri())
            .insert("bookings", &record())
            .await
            .unwrap_err();

        match err {
            StoreError::Rejected(msg) => assert!(msg.contains("customer_phone")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_table_name() {
        let err = store("http://127.0.0.1:9")
            .insert("bookings; drop", &record())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidTable(_)));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = SupabaseStore::new(SupabaseSettings {
            url: " ".into(),
            service_key: Secret::new("k".into()),
            timeout: None,
        });
        assert!(result.is_err());
    }
}
