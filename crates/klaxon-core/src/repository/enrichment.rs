//! Enrichment repository trait definition.
//!
//! Enrichments are stored per alert fingerprint and merged on write: saving
//! `{note: "..."}` over an existing `{ticket_url: "..."}` keeps both.

use klaxon_types::enrichment::AlertEnrichment;
use klaxon_types::error::RepositoryError;

/// Repository trait for alert enrichments.
pub trait EnrichmentRepository: Send + Sync {
    /// Merge the given enrichment into any stored one for its fingerprint.
    fn save_enrichment(
        &self,
        enrichment: &AlertEnrichment,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get the stored enrichment for a fingerprint.
    fn get_enrichment(
        &self,
        fingerprint: &str,
    ) -> impl std::future::Future<Output = Result<Option<AlertEnrichment>, RepositoryError>> + Send;

    /// Delete the enrichment for a fingerprint. Returns `true` if it existed.
    fn delete_enrichment(
        &self,
        fingerprint: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
