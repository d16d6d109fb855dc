use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::{CoreResult, Order};

/// Outcome of a single charge attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResult {
    pub success: bool,
    pub transaction_id: Option<String>, // Provider's reference when approved
    pub failure: Option<String>,
}

impl PaymentResult {
    pub fn approved() -> Self {
        Self {
            success: true,
            transaction_id: None,
            failure: None,
        }
    }

    pub fn declined(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            failure: Some(reason.into()),
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the order.
    ///
    /// A declined charge is an `Ok` result with `success == false`; invalid
    /// input (such as a blank payment method) is reported as an error.
    async fn pay(&self, order: &Order) -> CoreResult<PaymentResult>;
}
