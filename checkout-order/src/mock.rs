//! Scriptable stand-ins for the three collaborators.
//!
//! Every double counts its calls, keeps what it was given, and can append to a
//! shared [`CallLog`] so tests can check the order collaborators ran in. An
//! unscripted double answers with a decline.

use async_trait::async_trait;
use checkout_core::{
    AuditSink, CoreError, CoreResult, Order, OrderResponse, PaymentGateway, PaymentResult,
    ShippingGateway, ShippingResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// What a double does when called.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Return(T),
    /// Return an error whose message is exactly this text
    Fail(String),
    Panic(String),
}

/// Shared, ordered record of collaborator invocations.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &'static str) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(name);
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

struct Script<T> {
    label: &'static str,
    reply: Reply<T>,
    calls: AtomicUsize,
    log: Option<CallLog>,
}

impl<T: Clone> Script<T> {
    fn new(label: &'static str, reply: Reply<T>) -> Self {
        Self {
            label,
            reply,
            calls: AtomicUsize::new(0),
            log: None,
        }
    }

    fn invoke(&self) -> CoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.record(self.label);
        }
        match &self.reply {
            Reply::Return(value) => Ok(value.clone()),
            Reply::Fail(message) => Err(CoreError::Other(message.clone().into())),
            Reply::Panic(message) => panic!("{}", message),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub struct MockPaymentGateway {
    script: Script<PaymentResult>,
    orders: Mutex<Vec<Order>>,
}

impl MockPaymentGateway {
    pub fn new(reply: Reply<PaymentResult>) -> Self {
        Self {
            script: Script::new("payment", reply),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn approving() -> Self {
        Self::new(Reply::Return(PaymentResult::approved()))
    }

    pub fn declining(reason: &str) -> Self {
        Self::new(Reply::Return(PaymentResult::declined(reason)))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Reply::Fail(message.to_string()))
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.script.log = Some(log);
        self
    }

    pub fn calls(&self) -> usize {
        self.script.calls()
    }

    pub fn received(&self) -> Vec<Order> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::declining("no payment reply scripted")
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn pay(&self, order: &Order) -> CoreResult<PaymentResult> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner).push(order.clone());
        self.script.invoke()
    }
}

pub struct MockShippingGateway {
    script: Script<ShippingResult>,
    orders: Mutex<Vec<Order>>,
}

impl MockShippingGateway {
    pub fn new(reply: Reply<ShippingResult>) -> Self {
        Self {
            script: Script::new("shipping", reply),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn shipping() -> Self {
        Self::new(Reply::Return(ShippingResult::shipped()))
    }

    pub fn rejecting(reason: &str) -> Self {
        Self::new(Reply::Return(ShippingResult::rejected(reason)))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Reply::Fail(message.to_string()))
    }

    pub fn panicking(message: &str) -> Self {
        Self::new(Reply::Panic(message.to_string()))
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.script.log = Some(log);
        self
    }

    pub fn calls(&self) -> usize {
        self.script.calls()
    }

    pub fn received(&self) -> Vec<Order> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Default for MockShippingGateway {
    fn default() -> Self {
        Self::rejecting("no shipping reply scripted")
    }
}

#[async_trait]
impl ShippingGateway for MockShippingGateway {
    async fn ship(&self, order: &Order) -> CoreResult<ShippingResult> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner).push(order.clone());
        self.script.invoke()
    }
}

pub struct MockAuditSink {
    script: Script<()>,
    entries: Mutex<Vec<(Order, OrderResponse)>>,
}

impl MockAuditSink {
    pub fn new(reply: Reply<()>) -> Self {
        Self {
            script: Script::new("audit", reply),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Reply::Fail(message.to_string()))
    }

    pub fn panicking(message: &str) -> Self {
        Self::new(Reply::Panic(message.to_string()))
    }

    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.script.log = Some(log);
        self
    }

    pub fn calls(&self) -> usize {
        self.script.calls()
    }

    pub fn entries(&self) -> Vec<(Order, OrderResponse)> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last_response(&self) -> Option<OrderResponse> {
        self.entries().pop().map(|(_, response)| response)
    }
}

impl Default for MockAuditSink {
    fn default() -> Self {
        Self::new(Reply::Return(()))
    }
}

#[async_trait]
impl AuditSink for MockAuditSink {
    async fn log_order(&self, order: &Order, response: &OrderResponse) -> CoreResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((order.clone(), response.clone()));
        self.script.invoke()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_payment_declines() {
        let gateway = MockPaymentGateway::default();
        let order = Order::new("customer@example.com", "SuperCard");

        let result = gateway.pay(&order).await.unwrap();

        assert!(!result.success);
        assert_eq!(gateway.calls(), 1);
        assert_eq!(gateway.received(), vec![order]);
    }

    #[tokio::test]
    async fn test_failing_reply_keeps_message() {
        let gateway = MockShippingGateway::failing("carrier offline");
        let order = Order::new("customer@example.com", "SuperCard");

        let err = gateway.ship(&order).await.unwrap_err();

        assert_eq!(err.to_string(), "carrier offline");
    }

    #[tokio::test]
    async fn test_call_log_is_shared() {
        let log = CallLog::new();
        let payment = MockPaymentGateway::approving().with_call_log(log.clone());
        let audit = MockAuditSink::default().with_call_log(log.clone());
        let order = Order::new("customer@example.com", "SuperCard");

        payment.pay(&order).await.unwrap();
        let response = OrderResponse::payment_failed(&order, PaymentResult::declined("test"));
        audit.log_order(&order, &response).await.unwrap();

        assert_eq!(log.entries(), vec!["payment", "audit"]);
        assert_eq!(audit.last_response(), Some(response));
    }
}
