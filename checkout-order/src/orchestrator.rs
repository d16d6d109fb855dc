use checkout_core::{
    AuditSink, CoreResult, Order, OrderResponse, PaymentGateway, PaymentResult, ShippingGateway,
    ShippingResult,
};
use checkout_shared::Masked;
use futures_util::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Sequences payment, shipping and audit for one order at a time.
///
/// Holds no per-submission state, so a single instance can be shared across
/// tasks. Each collaborator call is awaited before the next one starts.
pub struct OrderOrchestrator {
    payment: Arc<dyn PaymentGateway>,
    shipping: Arc<dyn ShippingGateway>,
    audit: Arc<dyn AuditSink>,
}

impl OrderOrchestrator {
    pub fn new(
        payment: Arc<dyn PaymentGateway>,
        shipping: Arc<dyn ShippingGateway>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            payment,
            shipping,
            audit,
        }
    }

    /// Submit an order: charge it, ship it if the charge went through, then
    /// audit the outcome.
    ///
    /// Never fails. Gateway errors and panics are folded into the returned
    /// response, and the audit sink sees exactly the value returned here.
    pub async fn submit(&self, order: &Order) -> OrderResponse {
        tracing::debug!(
            order_id = %order.order_id,
            payment_method = ?Masked(&order.payment_method),
            "Submitting order"
        );

        let payment = self.attempt_payment(order).await;

        let response = if payment.success {
            let shipping = self.attempt_shipping(order).await;
            OrderResponse::shipping_attempted(order, payment, Some(shipping))
        } else {
            OrderResponse::payment_failed(order, payment)
        };

        self.record(order, &response).await;

        tracing::info!(
            order_id = %response.order_id,
            success = response.success,
            failure_stage = ?response.failure_stage(),
            "Order submission finished"
        );
        response
    }

    async fn attempt_payment(&self, order: &Order) -> PaymentResult {
        match contain(self.payment.pay(order)).await {
            Ok(result) => {
                if !result.success {
                    tracing::warn!(
                        order_id = %order.order_id,
                        reason = result.failure.as_deref().unwrap_or("unspecified"),
                        "Payment declined"
                    );
                }
                result
            }
            Err(detail) => {
                tracing::warn!(order_id = %order.order_id, error = %detail, "Payment gateway failed");
                PaymentResult::declined(detail)
            }
        }
    }

    async fn attempt_shipping(&self, order: &Order) -> ShippingResult {
        match contain(self.shipping.ship(order)).await {
            Ok(result) => {
                if !result.success {
                    tracing::warn!(
                        order_id = %order.order_id,
                        reason = result.failure.as_deref().unwrap_or("unspecified"),
                        "Shipping rejected"
                    );
                }
                result
            }
            Err(detail) => {
                tracing::warn!(order_id = %order.order_id, error = %detail, "Shipping gateway failed");
                ShippingResult::rejected(detail)
            }
        }
    }

    /// Audit failures are logged and dropped: no retry, and the response is
    /// already final.
    async fn record(&self, order: &Order, response: &OrderResponse) {
        if let Err(detail) = contain(self.audit.log_order(order, response)).await {
            tracing::error!(order_id = %order.order_id, error = %detail, "Audit sink failed");
        }
    }
}

/// Runs a collaborator call, turning both errors and panics into a failure detail.
async fn contain<T, F>(call: F) -> Result<T, String>
where
    F: Future<Output = CoreResult<T>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => {
            let detail = format!("collaborator panicked: {}", panic_message(payload.as_ref()));
            tracing::error!("{}", detail);
            Err(detail)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::CoreError;

    #[tokio::test]
    async fn test_contain_passes_values_through() {
        let result = contain(async { Ok::<_, CoreError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_contain_reports_error_text() {
        let result: Result<(), String> =
            contain(async { Err(CoreError::Unavailable("carrier offline".to_string())) }).await;
        assert_eq!(result, Err("Backend unavailable: carrier offline".to_string()));
    }

    #[tokio::test]
    async fn test_contain_catches_panics() {
        let result: Result<(), String> = contain(async {
            if true {
                panic!("boom");
            }
            Ok(())
        })
        .await;
        assert_eq!(result, Err("collaborator panicked: boom".to_string()));
    }
}
