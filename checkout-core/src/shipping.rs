use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::{CoreResult, Order};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingResult {
    pub success: bool,
    pub tracking_number: Option<String>,
    pub failure: Option<String>,
}

impl ShippingResult {
    pub fn shipped() -> Self {
        Self {
            success: true,
            tracking_number: None,
            failure: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            tracking_number: None,
            failure: Some(reason.into()),
        }
    }

    pub fn with_tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }
}

#[async_trait]
pub trait ShippingGateway: Send + Sync {
    /// Hand the order to the carrier. Only called for paid orders.
    async fn ship(&self, order: &Order) -> CoreResult<ShippingResult>;
}
