//! In-memory, DashMap-backed implementations of the klaxon-core ports.
//!
//! Klaxon's stores are registries, not archives: alerts are keyed by
//! fingerprint and replaced on re-ingestion, workflows are loaded from
//! definition files at startup, enrichments merge per fingerprint. DashMap
//! gives lock-free concurrent access from axum handlers.

pub mod alert;
pub mod enrichment;
pub mod workflow;

pub use alert::InMemoryAlertStore;
pub use enrichment::InMemoryEnrichmentStore;
pub use workflow::InMemoryWorkflowStore;
