//! # Booking Hex
//!
//! Application service layer and HTTP adapter for the booking checkout service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (order, verification, booking phases)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document of the HTTP surface
//!
//! The service is generic over `G: PaymentGateway` and `S: BookingStore`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{BookingService, ServiceSettings};
