use crate::pii::Masked;
use chrono::{DateTime, Utc};

/// Outcome label carried by an [`OrderAuditedEvent`].
#[derive(Debug, serde::Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditOutcome {
    Completed,
    PaymentFailed,
    ShippingFailed,
}

/// One audit entry per order submission.
#[derive(Debug, serde::Serialize, Clone)]
pub struct OrderAuditedEvent {
    pub order_id: String,
    pub customer_id: String,
    pub payment_method: Masked<String>,
    pub outcome: AuditOutcome,
    pub payment_success: Option<bool>,
    pub shipping_success: Option<bool>,
    pub failure_detail: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl OrderAuditedEvent {
    pub fn success(&self) -> bool {
        self.outcome == AuditOutcome::Completed
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({
            "order_id": self.order_id,
            "outcome": self.outcome,
        }))
    }
}
