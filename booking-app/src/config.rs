//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use secrecy::{ExposeSecret, Secret, SecretString};

use booking_hex::ServiceSettings;
use booking_repo::{RazorpaySettings, StoreSettings, SupabaseSettings, razorpay};

/// Application configuration.
pub struct Config {
    pub host: String,
    pub port: u16,
    pub razorpay_key_id: Option<String>,
    pub razorpay_key_secret: Option<SecretString>,
    pub razorpay_api_base_url: String,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<SecretString>,
    pub database_url: Option<String>,
    pub bookings_table: String,
    pub require_verification_token: bool,
    pub verification_token_ttl: Duration,
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v.parse().with_context(|| format!("PORT must be a port number, got {}", v))?,
            None => 10000,
        };

        let require_verification_token = match get("REQUIRE_VERIFICATION_TOKEN") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("REQUIRE_VERIFICATION_TOKEN must be true or false, got {}", v))?,
            None => false,
        };

        let verification_token_ttl = match get("VERIFICATION_TOKEN_TTL_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .parse()
                    .with_context(|| format!("VERIFICATION_TOKEN_TTL_SECS must be seconds, got {}", v))?;
                // Token expiry is a signed unix timestamp.
                i64::try_from(secs)
                    .with_context(|| format!("VERIFICATION_TOKEN_TTL_SECS is out of range: {}", v))?;
                Duration::from_secs(secs)
            }
            None => booking_hex::service::DEFAULT_TOKEN_TTL,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(
                v.parse()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be seconds, got {}", v))?,
            )),
            None => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            razorpay_key_id: get("RAZORPAY_KEY_ID"),
            razorpay_key_secret: get("RAZORPAY_KEY_SECRET").map(Secret::new),
            razorpay_api_base_url: get("RAZORPAY_API_BASE_URL")
                .unwrap_or_else(|| razorpay::DEFAULT_API_BASE_URL.to_string()),
            supabase_url: get("SUPABASE_URL"),
            supabase_service_key: get("SUPABASE_SERVICE_ROLE_KEY").map(Secret::new),
            database_url: get("DATABASE_URL"),
            bookings_table: get("BOOKINGS_TABLE").unwrap_or_else(|| "bookings".to_string()),
            require_verification_token,
            verification_token_ttl,
            http_timeout,
        })
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Gateway adapter settings.
    pub fn razorpay(&self) -> RazorpaySettings {
        RazorpaySettings {
            key_id: self.razorpay_key_id.clone(),
            key_secret: self.razorpay_key_secret.clone(),
            api_base_url: self.razorpay_api_base_url.clone(),
            timeout: self.http_timeout,
        }
    }

    /// Picks the booking store: Supabase when configured, otherwise SQLite.
    pub fn store(&self) -> anyhow::Result<StoreSettings> {
        if let (Some(url), Some(key)) = (&self.supabase_url, &self.supabase_service_key) {
            return Ok(StoreSettings::Supabase(SupabaseSettings {
                url: url.clone(),
                service_key: key.clone(),
                timeout: self.http_timeout,
            }));
        }

        #[cfg(feature = "sqlite")]
        {
            if let Some(database_url) = &self.database_url {
                return Ok(StoreSettings::Sqlite {
                    database_url: database_url.clone(),
                });
            }
        }

        anyhow::bail!(
            "No booking store configured: set SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY, or DATABASE_URL"
        )
    }

    /// Settings for the checkout service.
    pub fn service(&self) -> ServiceSettings {
        ServiceSettings {
            key_id: self.razorpay_key_id.clone(),
            key_secret: self.razorpay_key_secret.clone(),
            bookings_table: self.bookings_table.clone(),
            require_verification_token: self.require_verification_token,
            verification_token_ttl: self.verification_token_ttl,
        }
    }

    /// Logs which credentials are present. Values are never logged.
    pub fn log_credentials(&self) {
        let secret_set = self
            .razorpay_key_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());

        tracing::info!(
            razorpay_key_id = self.razorpay_key_id.is_some(),
            razorpay_key_secret = secret_set,
            supabase_url = self.supabase_url.is_some(),
            supabase_service_key = self.supabase_service_key.is_some(),
            "Credential check"
        );
        if !secret_set {
            tracing::warn!("RAZORPAY_KEY_SECRET is not set; orders and verification will fail");
        }
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => anyhow::bail!("not a boolean"),
    }
}
