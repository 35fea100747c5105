//! Repository trait definitions (ports implemented by klaxon-infra).

pub mod alert;
pub mod enrichment;
pub mod workflow;

pub use alert::AlertRepository;
pub use enrichment::EnrichmentRepository;
pub use workflow::WorkflowRepository;
