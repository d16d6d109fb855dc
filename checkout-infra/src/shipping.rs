use crate::app_config::ShippingConfig;
use async_trait::async_trait;
use checkout_core::{CoreError, CoreResult, Order, ShippingGateway, ShippingResult};

pub const MISSING_ADDRESS: &str = "Must provide a shipping address.";

/// Books the shipment with the configured carrier and issues a tracking number.
pub struct StandardShippingGateway {
    config: ShippingConfig,
}

impl StandardShippingGateway {
    pub fn new(config: ShippingConfig) -> Self {
        Self { config }
    }

    // Format: {CARRIER}-{timestamp}-{short_order_id}
    fn tracking_number(&self, order: &Order) -> String {
        let timestamp = chrono::Utc::now().timestamp();
        let short_id: String = order.order_id.chars().filter(|c| *c != '-').take(8).collect();
        format!("{}-{}-{}", self.config.carrier_code, timestamp, short_id.to_uppercase())
    }
}

impl Default for StandardShippingGateway {
    fn default() -> Self {
        Self::new(ShippingConfig::default())
    }
}

#[async_trait]
impl ShippingGateway for StandardShippingGateway {
    async fn ship(&self, order: &Order) -> CoreResult<ShippingResult> {
        if order.shipping_address.trim().is_empty() {
            return Err(CoreError::ValidationError(MISSING_ADDRESS.to_string()));
        }
        if order.items.is_empty() {
            return Ok(ShippingResult::rejected("Order has no items to ship"));
        }

        let tracking_number = self.tracking_number(order);
        tracing::debug!(order_id = %order.order_id, %tracking_number, "Shipment booked");
        Ok(ShippingResult::shipped().with_tracking_number(tracking_number))
    }
}
