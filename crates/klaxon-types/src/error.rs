use thiserror::Error;

/// Errors from repository operations (used by trait definitions in klaxon-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage backend unavailable")]
    Unavailable,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors related to enrichment operations.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("no alert with fingerprint '{0}'")]
    AlertNotFound(String),

    #[error("empty enrichment payload")]
    Empty,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors related to alert provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),
}

/// Errors from loading workflow definitions.
#[derive(Debug, Error)]
pub enum WorkflowLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workflow definition in {path}: {message}")]
    Invalid { path: String, message: String },

    #[error("duplicate workflow id '{0}'")]
    DuplicateId(String),
}
