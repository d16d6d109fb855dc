pub mod app_config;
pub mod audit;
pub mod payment;
pub mod shipping;
pub mod telemetry;

pub use app_config::Config;
pub use audit::AuditJournal;
pub use payment::StandardPaymentGateway;
pub use shipping::StandardShippingGateway;

use checkout_order::OrderOrchestrator;
use std::sync::Arc;

/// Orchestrator wired to the standard gateways, plus a handle on its audit journal.
pub struct Checkout {
    pub orchestrator: OrderOrchestrator,
    pub journal: Arc<AuditJournal>,
}

pub fn standard_checkout(config: &Config) -> Checkout {
    let journal = Arc::new(AuditJournal::new(config.audit.journal_capacity));
    let orchestrator = OrderOrchestrator::new(
        Arc::new(StandardPaymentGateway::new(config.payment.clone())),
        Arc::new(StandardShippingGateway::new(config.shipping.clone())),
        journal.clone(),
    );

    tracing::info!(
        carrier = %config.shipping.carrier_code,
        accepted_methods = config.payment.accepted_methods.len(),
        "Checkout wired"
    );
    Checkout { orchestrator, journal }
}
