use async_trait::async_trait;
use checkout_core::{AuditSink, CoreResult, FailureStage, Order, OrderResponse};
use checkout_shared::models::events::{AuditOutcome, OrderAuditedEvent};
use checkout_shared::Masked;
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Audit sink that emits every submission as a structured `tracing` event on
/// the `checkout::audit` target and keeps the most recent records in memory.
pub struct AuditJournal {
    capacity: usize,
    records: RwLock<VecDeque<OrderAuditedEvent>>,
}

impl AuditJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Oldest first
    pub async fn records(&self) -> Vec<OrderAuditedEvent> {
        self.records.read().await.iter().cloned().collect()
    }
}

pub fn audit_event(order: &Order, response: &OrderResponse) -> OrderAuditedEvent {
    let outcome = match response.failure_stage() {
        None => AuditOutcome::Completed,
        Some(FailureStage::Payment) => AuditOutcome::PaymentFailed,
        Some(FailureStage::Shipping) => AuditOutcome::ShippingFailed,
    };

    OrderAuditedEvent {
        order_id: response.order_id.clone(),
        customer_id: order.customer_id.clone(),
        payment_method: Masked(order.payment_method.clone()),
        outcome,
        payment_success: response.payment_result.as_ref().map(|p| p.success),
        shipping_success: response.shipping_result.as_ref().map(|s| s.success),
        failure_detail: response.failure_detail().map(str::to_string),
        recorded_at: chrono::Utc::now(),
    }
}

#[async_trait]
impl AuditSink for AuditJournal {
    async fn log_order(&self, order: &Order, response: &OrderResponse) -> CoreResult<()> {
        let event = audit_event(order, response);

        tracing::info!(
            target: "checkout::audit",
            order_id = %event.order_id,
            outcome = ?event.outcome,
            success = event.success(),
            record = %event.to_json(),
            "Order audited"
        );

        if self.capacity == 0 {
            return Ok(());
        }

        let mut records = self.records.write().await;
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{PaymentResult, ShippingResult};

    fn order(id: &str) -> Order {
        Order::new("customer@example.com", "SuperCard").with_order_id(id)
    }

    #[tokio::test]
    async fn test_records_outcomes() {
        let journal = AuditJournal::new(10);
        let paid = order("ord-1");
        let declined = order("ord-2");

        journal
            .log_order(
                &paid,
                &OrderResponse::shipping_attempted(&paid, PaymentResult::approved(), Some(ShippingResult::shipped())),
            )
            .await
            .unwrap();
        journal
            .log_order(&declined, &OrderResponse::payment_failed(&declined, PaymentResult::declined("card expired")))
            .await
            .unwrap();

        let records = journal.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].outcome, AuditOutcome::Completed);
        assert_eq!(records[1].outcome, AuditOutcome::PaymentFailed);
        assert_eq!(records[1].shipping_success, None);
        assert_eq!(records[1].failure_detail.as_deref(), Some("card expired"));
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let journal = AuditJournal::new(2);
        for id in ["ord-1", "ord-2", "ord-3"] {
            let order = order(id);
            let response = OrderResponse::payment_failed(&order, PaymentResult::declined("card expired"));
            journal.log_order(&order, &response).await.unwrap();
        }

        let ids: Vec<String> = journal.records().await.into_iter().map(|r| r.order_id).collect();
        assert_eq!(ids, vec!["ord-2", "ord-3"]);
    }

    #[tokio::test]
    async fn test_zero_capacity_keeps_nothing() {
        let journal = AuditJournal::new(0);
        let order = order("ord-1");
        let response = OrderResponse::payment_failed(&order, PaymentResult::declined("card expired"));

        journal.log_order(&order, &response).await.unwrap();

        assert!(journal.records().await.is_empty());
    }
}
