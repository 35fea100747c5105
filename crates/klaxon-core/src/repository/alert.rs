//! Alert repository trait definition.
//!
//! Defines the storage interface for ingested alerts, keyed by fingerprint.
//! Uses native async fn in traits (Rust 2024 edition, no async_trait macro).

use klaxon_types::alert::Alert;
use klaxon_types::error::RepositoryError;

/// Repository trait for alert persistence.
///
/// Saving an alert with an already-stored fingerprint replaces the previous
/// record (providers re-send the same condition on every evaluation cycle).
pub trait AlertRepository: Send + Sync {
    /// Upsert an alert by fingerprint.
    fn save_alert(
        &self,
        alert: &Alert,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get an alert by its fingerprint.
    fn get_alert(
        &self,
        fingerprint: &str,
    ) -> impl std::future::Future<Output = Result<Option<Alert>, RepositoryError>> + Send;

    /// List all stored alerts, most recently received first.
    fn list_alerts(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Alert>, RepositoryError>> + Send;

    /// Delete an alert by fingerprint. Returns `true` if it existed.
    fn delete_alert(
        &self,
        fingerprint: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
