use async_trait::async_trait;
use crate::{CoreResult, Order, OrderResponse};

/// Records every submission, whatever its outcome.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn log_order(&self, order: &Order, response: &OrderResponse) -> CoreResult<()>;
}
