use serde::{Deserialize, Serialize};
use crate::{Order, PaymentResult, ShippingResult};

/// Which step caused a submission to fail
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureStage {
    Payment,
    Shipping,
}

/// The single artifact produced per submission. Returned to the caller and
/// handed, unchanged, to the audit sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderResponse {
    pub order_id: String,
    pub success: bool,
    pub payment_result: Option<PaymentResult>,
    pub shipping_result: Option<ShippingResult>,
}

impl OrderResponse {
    /// Payment did not go through; shipping was never attempted.
    pub fn payment_failed(order: &Order, payment: PaymentResult) -> Self {
        Self {
            order_id: order.order_id.clone(),
            success: false,
            payment_result: Some(payment),
            shipping_result: None,
        }
    }

    /// Payment went through and shipping was attempted. `shipping` is `None`
    /// when the shipping outcome could not be captured, which counts as a failure.
    pub fn shipping_attempted(
        order: &Order,
        payment: PaymentResult,
        shipping: Option<ShippingResult>,
    ) -> Self {
        let success = payment.success && shipping.as_ref().is_some_and(|s| s.success);
        Self {
            order_id: order.order_id.clone(),
            success,
            payment_result: Some(payment),
            shipping_result: shipping,
        }
    }

    pub fn failure_stage(&self) -> Option<FailureStage> {
        if self.success {
            return None;
        }
        match &self.payment_result {
            Some(payment) if payment.success => Some(FailureStage::Shipping),
            _ => Some(FailureStage::Payment),
        }
    }

    /// First failure detail recorded by either step.
    pub fn failure_detail(&self) -> Option<&str> {
        self.payment_result
            .as_ref()
            .and_then(|p| p.failure.as_deref())
            .or_else(|| self.shipping_result.as_ref().and_then(|s| s.failure.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new("customer@example.com", "SuperCard").with_order_id("ord-1")
    }

    #[test]
    fn test_success_requires_both_steps() {
        let response = OrderResponse::shipping_attempted(
            &order(),
            PaymentResult::approved(),
            Some(ShippingResult::shipped()),
        );
        assert!(response.success);
        assert_eq!(response.order_id, "ord-1");
        assert_eq!(response.failure_stage(), None);
        assert_eq!(response.failure_detail(), None);
    }

    #[test]
    fn test_payment_failure_has_no_shipping() {
        let response = OrderResponse::payment_failed(&order(), PaymentResult::declined("insufficient funds"));
        assert!(!response.success);
        assert!(response.shipping_result.is_none());
        assert_eq!(response.failure_stage(), Some(FailureStage::Payment));
        assert_eq!(response.failure_detail(), Some("insufficient funds"));
    }

    #[test]
    fn test_rejected_shipping_fails_response() {
        let response = OrderResponse::shipping_attempted(
            &order(),
            PaymentResult::approved(),
            Some(ShippingResult::rejected("address unreachable")),
        );
        assert!(!response.success);
        assert_eq!(response.failure_stage(), Some(FailureStage::Shipping));
        assert_eq!(response.failure_detail(), Some("address unreachable"));
    }

    #[test]
    fn test_missing_shipping_outcome_fails_response() {
        let response = OrderResponse::shipping_attempted(&order(), PaymentResult::approved(), None);
        assert!(!response.success);
        assert_eq!(response.failure_stage(), Some(FailureStage::Shipping));
    }
}
