//! Booking Checkout Application Service
//!
//! Orchestrates the three checkout phases through the gateway and store ports.
//! Contains NO infrastructure logic - pure business orchestration.

use std::time::Duration;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use booking_repo::security;
use booking_types::{
    AppError, BookingRecord, BookingSlot, BookingStore, CreateOrderRequest, Currency,
    DomainError, Money, NewOrder, Order, PaymentClaim, PaymentGateway, PaymentReference,
    SaveBookingRequest, SaveBookingResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};

/// Default lifetime of a verification token.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Settings the service needs besides its adapters.
#[derive(Clone, Debug)]
pub struct ServiceSettings {
    /// Public gateway key handed to the checkout widget
    pub key_id: Option<String>,
    /// Shared secret used to check payment signatures
    pub key_secret: Option<SecretString>,
    /// Table bookings are inserted into
    pub bookings_table: String,
    /// Refuse bookings that do not carry a verification token
    pub require_verification_token: bool,
    pub verification_token_ttl: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            key_id: None,
            key_secret: None,
            bookings_table: "bookings".to_string(),
            require_verification_token: false,
            verification_token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

/// Application service for the checkout flow.
///
/// Generic over `G: PaymentGateway` and `S: BookingStore` - adapters are
/// injected at construction time and shared by every request.
pub struct BookingService<G: PaymentGateway, S: BookingStore> {
    gateway: G,
    store: S,
    settings: ServiceSettings,
}

impl<G: PaymentGateway, S: BookingStore> BookingService<G, S> {
    /// Creates a new booking service with the given adapters.
    pub fn new(gateway: G, store: S, settings: ServiceSettings) -> Self {
        Self {
            gateway,
            store,
            settings,
        }
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Public gateway key, if configured.
    pub fn public_key(&self) -> Option<&str> {
        self.settings.key_id.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Phase 1: Order Initiator
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a gateway order for an amount given in rupees.
    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, AppError> {
        let amount = req
            .amount
            .ok_or_else(|| AppError::InvalidInput("Amount is required".into()))?;
        let amount = Money::from_major(amount, Currency::INR)?;

        let order = NewOrder::new(amount, Utc::now());
        tracing::info!(amount = %amount, receipt = %order.receipt, "Creating order");

        self.gateway.create_order(order).await.map_err(|e| {
            tracing::error!(error = %e, "Create order failed");
            e.into()
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Phase 2: Payment Verifier
    // ─────────────────────────────────────────────────────────────────────────────

    /// Checks a payment claim against the shared secret.
    ///
    /// On success a verification token is issued that `save_booking` accepts
    /// as proof of this verification.
    pub fn verify_payment(
        &self,
        req: VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, AppError> {
        let secret = self.signing_secret()?;

        let claim = PaymentClaim::new(
            req.razorpay_order_id,
            req.razorpay_payment_id,
            req.razorpay_signature,
        )?;

        if !security::verify_payment_signature(&claim, secret) {
            tracing::warn!(
                order_id = %claim.order_id,
                payment_id = %claim.payment_id,
                "Payment signature mismatch"
            );
            return Err(AppError::SignatureMismatch);
        }

        tracing::info!(
            order_id = %claim.order_id,
            payment_id = %claim.payment_id,
            "Payment signature verified"
        );

        let ttl = i64::try_from(self.settings.verification_token_ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = Utc::now().timestamp().saturating_add(ttl);
        let token = security::issue_verification_token(
            &claim.order_id,
            &claim.payment_id,
            secret,
            expires_at,
        );

        Ok(VerifyPaymentResponse {
            success: true,
            verification_token: Some(token),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Phase 3: Booking Recorder
    // ─────────────────────────────────────────────────────────────────────────────

    /// Normalizes a booking payload and inserts one row.
    pub async fn save_booking(
        &self,
        req: SaveBookingRequest,
    ) -> Result<SaveBookingResponse, AppError> {
        let payment = req.payment_reference()?;
        self.check_verification(req.verification_token.as_deref(), &payment)?;

        let slot = BookingSlot::try_from(req.booking)?;
        let record = BookingRecord::paid(
            req.customer.into(),
            req.services,
            slot,
            req.total_amount,
            payment,
            req.user_id,
        )?;

        tracing::info!(
            customer_email = %record.customer_email,
            booking_date = %record.booking_date,
            "Saving booking"
        );

        let ack = self
            .store
            .insert(&self.settings.bookings_table, &record)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Booking insert failed");
                AppError::from(e)
            })?;

        Ok(SaveBookingResponse {
            success: true,
            data: ack.rows,
        })
    }

    fn check_verification(
        &self,
        token: Option<&str>,
        payment: &PaymentReference,
    ) -> Result<(), AppError> {
        let token = match token {
            Some(token) => token,
            None if self.settings.require_verification_token => {
                return Err(DomainError::Unverified("verificationToken is required".into()).into());
            }
            None => return Ok(()),
        };

        let secret = self.signing_secret()?;
        let order_id = payment.order_id.as_deref().ok_or_else(|| {
            DomainError::Unverified("payment order id is required with a verification token".into())
        })?;

        security::check_verification_token(
            token,
            order_id,
            &payment.payment_id,
            secret,
            Utc::now().timestamp(),
        )
        .map_err(|e| {
            tracing::warn!(payment_id = %payment.payment_id, reason = %e, "Verification token refused");
            DomainError::Unverified(e.to_string()).into()
        })
    }

    fn signing_secret(&self) -> Result<&str, AppError> {
        self.settings
            .key_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                tracing::error!("RAZORPAY_KEY_SECRET is not configured");
                AppError::Config("payment signing secret is not configured".into())
            })
    }
}
