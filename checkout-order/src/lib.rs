pub mod mock;
pub mod orchestrator;

pub use orchestrator::OrderOrchestrator;
