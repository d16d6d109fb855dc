use checkout_shared::Masked;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The unit of work submitted for payment and shipment.
///
/// Apart from `order_id` and `payment_method`, every field is opaque to the
/// orchestrator and only matters to the collaborators.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub payment_method: String,
    pub shipping_address: String,
    pub items: Vec<OrderLine>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(customer_id: impl Into<String>, payment_method: impl Into<String>) -> Self {
        Self {
            order_id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            payment_method: payment_method.into(),
            shipping_address: String::new(),
            items: Vec::new(),
            currency: "USD".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Use a caller-generated identifier instead of the random one.
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = order_id.into();
        self
    }

    pub fn with_shipping_address(mut self, address: impl Into<String>) -> Self {
        self.shipping_address = address.into();
        self
    }

    pub fn add_item(&mut self, item: OrderLine) {
        self.items.push(item);
    }

    /// Order total in minor currency units. `None` when it does not fit in an `i64`.
    pub fn total_cents(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |total, line| total.checked_add(line.line_total_cents()?))
    }
}

impl fmt::Debug for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("order_id", &self.order_id)
            .field("customer_id", &self.customer_id)
            .field("payment_method", &Masked(&self.payment_method))
            .field("shipping_address", &self.shipping_address)
            .field("items", &self.items)
            .field("currency", &self.currency)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl OrderLine {
    pub fn new(sku: impl Into<String>, quantity: u32, unit_price_cents: i64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            unit_price_cents,
        }
    }

    pub fn line_total_cents(&self) -> Option<i64> {
        self.unit_price_cents.checked_mul(i64::from(self.quantity))
    }
}
