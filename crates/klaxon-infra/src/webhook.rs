//! Ingest webhook authentication.
//!
//! Providers push alert payloads to the ingest endpoint; when an ingest
//! token is configured, requests must carry it as a bearer token. Token
//! comparison is constant-time.

/// Errors that can occur during ingest authentication.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Bearer token verification failed.
    #[error("bearer token verification failed")]
    BearerVerificationFailed,

    /// Missing authentication header.
    #[error("missing authentication: {0}")]
    MissingAuth(String),
}

/// Verify a bearer token using constant-time comparison.
///
/// The `provided` value may carry the `Bearer ` prefix from an
/// `Authorization` header.
pub fn verify_bearer_token(expected: &str, provided: &str) -> Result<(), WebhookError> {
    let token = provided.strip_prefix("Bearer ").unwrap_or(provided);

    if constant_time_eq(expected.as_bytes(), token.as_bytes()) {
        Ok(())
    } else {
        Err(WebhookError::BearerVerificationFailed)
    }
}

/// Verify an optional-token policy against an optional header.
///
/// No expected token -> always passes. Expected token but no header ->
/// `MissingAuth`. Both present -> constant-time comparison.
pub fn verify_ingest_auth(
    expected: Option<&str>,
    auth_header: Option<&str>,
) -> Result<(), WebhookError> {
    match (expected, auth_header) {
        (None, _) => Ok(()),
        (Some(_), None) => Err(WebhookError::MissingAuth(
            "Authorization header required".to_string(),
        )),
        (Some(expected), Some(provided)) => verify_bearer_token(expected, provided),
    }
}

/// Constant-time byte comparison (XOR accumulate).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
