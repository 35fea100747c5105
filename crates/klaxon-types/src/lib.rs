//! Shared domain types for Klaxon.
//!
//! This crate contains the core domain types used across the Klaxon platform:
//! Alert, Workflow, Trigger, AlertEnrichment, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod alert;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod workflow;
