use crate::app_config::PaymentConfig;
use async_trait::async_trait;
use checkout_core::{CoreError, CoreResult, Order, PaymentGateway, PaymentResult};
use checkout_shared::Masked;
use uuid::Uuid;

pub const INVALID_PAYMENT_METHOD: &str = "Must provide valid payment method.";

/// Validating front for the payment backend.
///
/// Rejects blank or unaccepted payment methods with a validation error and
/// declines orders with nothing to charge; everything else is approved with a
/// fresh transaction reference.
pub struct StandardPaymentGateway {
    config: PaymentConfig,
}

impl StandardPaymentGateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self { config }
    }
}

impl Default for StandardPaymentGateway {
    fn default() -> Self {
        Self::new(PaymentConfig::default())
    }
}

#[async_trait]
impl PaymentGateway for StandardPaymentGateway {
    async fn pay(&self, order: &Order) -> CoreResult<PaymentResult> {
        if !self.config.accepts(&order.payment_method) {
            tracing::debug!(
                order_id = %order.order_id,
                payment_method = ?Masked(&order.payment_method),
                "Rejected payment method"
            );
            return Err(CoreError::ValidationError(INVALID_PAYMENT_METHOD.to_string()));
        }

        let Some(total) = order.total_cents() else {
            return Ok(PaymentResult::declined("Order total exceeds the chargeable amount"));
        };
        if total <= 0 {
            return Ok(PaymentResult::declined(format!(
                "Order total must be positive, got {} {}",
                total, order.currency
            )));
        }

        let transaction_id = format!("pay_{}", Uuid::new_v4().simple());
        tracing::debug!(order_id = %order.order_id, %transaction_id, total, "Payment approved");
        Ok(PaymentResult::approved().with_transaction_id(transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::OrderLine;

    fn order(payment_method: &str) -> Order {
        let mut order = Order::new("customer@example.com", payment_method);
        order.add_item(OrderLine::new("SKU-1", 1, 1999));
        order
    }

    #[tokio::test]
    async fn test_throws_invalid_payment() {
        let gateway = StandardPaymentGateway::default();

        let err = gateway.pay(&order("")).await.unwrap_err();

        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(err.to_string(), "Must provide valid payment method.");
    }

    #[tokio::test]
    async fn test_rejects_unaccepted_method() {
        let gateway = StandardPaymentGateway::new(PaymentConfig {
            accepted_methods: vec!["SuperCard".to_string()],
        });

        let err = gateway.pay(&order("MonopolyMoney")).await.unwrap_err();
        assert_eq!(err.to_string(), INVALID_PAYMENT_METHOD);

        let result = gateway.pay(&order("supercard")).await.unwrap();
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_approves_with_reference() {
        let gateway = StandardPaymentGateway::default();

        let result = gateway.pay(&order("SuperCard")).await.unwrap();

        assert!(result.success);
        assert!(result.failure.is_none());
        assert!(result.transaction_id.unwrap().starts_with("pay_"));
    }

    #[tokio::test]
    async fn test_declines_overflowing_total() {
        let gateway = StandardPaymentGateway::default();
        let mut order = Order::new("customer@example.com", "SuperCard");
        order.add_item(OrderLine::new("SKU-BIG", u32::MAX, i64::MAX / 2));

        let result = gateway.pay(&order).await.unwrap();

        assert!(!result.success);
        assert!(result.transaction_id.is_none());
        assert!(result.failure.unwrap().contains("exceeds"));
    }

    #[tokio::test]
    async fn test_declines_empty_order() {
        let gateway = StandardPaymentGateway::default();
        let order = Order::new("customer@example.com", "SuperCard");

        let result = gateway.pay(&order).await.unwrap();

        assert!(!result.success);
        assert!(result.failure.unwrap().contains("must be positive"));
    }
}
