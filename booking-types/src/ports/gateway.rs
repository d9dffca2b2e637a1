//! Payment gateway port.

use crate::domain::{NewOrder, Order};
use crate::error::GatewayError;

/// Creates orders with the payment gateway.
///
/// One call, one remote attempt. Implementations must not retry.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Creates a pending order and returns the gateway's descriptor.
    async fn create_order(&self, order: NewOrder) -> Result<Order, GatewayError>;
}
