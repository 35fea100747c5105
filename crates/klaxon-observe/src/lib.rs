//! Observability setup for Klaxon.

pub mod tracing_setup;
