pub mod audit;
pub mod order;
pub mod payment;
pub mod response;
pub mod shipping;

pub use audit::AuditSink;
pub use order::{Order, OrderLine};
pub use payment::{PaymentGateway, PaymentResult};
pub use response::{FailureStage, OrderResponse};
pub use shipping::{ShippingGateway, ShippingResult};

/// Errors raised by the payment, shipping and audit collaborators.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input rejected before reaching the backend. The message is surfaced verbatim.
    #[error("{0}")]
    ValidationError(String),
    #[error("Declined by backend: {0}")]
    Declined(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CoreResult<T> = Result<T, CoreError>;
