//! Alert provider trait definition.
//!
//! An [`AlertProvider`] connects Klaxon to an external monitoring system.
//! Providers support two ingestion paths: pull (`fetch_alerts`, polling the
//! provider's API) and push (`map_event`, translating a webhook payload the
//! provider delivered to us). Both produce canonical [`Alert`] records.

use serde_json::Value;

use klaxon_types::alert::Alert;
use klaxon_types::error::ProviderError;

/// A connector to an external monitoring system.
pub trait AlertProvider: Send + Sync {
    /// Stable provider name, used as the alert `source` entry and in ingest
    /// routes (e.g. `"prometheus"`).
    fn provider_type(&self) -> &'static str;

    /// Pull current alerts from the provider's API.
    fn fetch_alerts(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Alert>, ProviderError>> + Send;

    /// Translate a pushed webhook payload into canonical alerts.
    ///
    /// Tolerant by design: events that cannot be mapped are skipped, not
    /// errors. An error is only returned when the payload as a whole is
    /// unusable.
    fn map_event(&self, event: &Value) -> Result<Vec<Alert>, ProviderError>;
}
