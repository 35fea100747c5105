//! Monitoring provider implementations.

pub mod prometheus;

pub use prometheus::PrometheusProvider;
