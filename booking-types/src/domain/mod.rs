//! Domain models for the booking checkout service.

pub mod booking;
pub mod money;
pub mod order;
pub mod payment;

pub use booking::{BookingRecord, BookingSlot, Customer, PaymentReference, PaymentStatus};
pub use money::{Currency, Money};
pub use order::{NewOrder, Order};
pub use payment::PaymentClaim;
