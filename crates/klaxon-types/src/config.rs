//! Global configuration types for Klaxon.
//!
//! `KlaxonConfig` represents the top-level `config.toml` that controls the
//! API server, workflow definition loading, and provider credentials.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Klaxon platform.
///
/// Loaded from `config.toml` in the data directory. All fields have
/// sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KlaxonConfig {
    /// API server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Directory containing workflow definition YAML files.
    #[serde(default = "default_workflow_dir")]
    pub workflow_dir: String,

    /// Bearer token required on the alert ingest endpoint. `None` disables
    /// ingest authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_token: Option<String>,

    /// Prometheus provider settings. `None` disables the provider's
    /// pull-based fetching (webhook ingestion still works).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prometheus: Option<PrometheusConfig>,
}

/// API server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Connection settings for the Prometheus provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrometheusConfig {
    /// Prometheus server URL (e.g. `https://prom.example.com/api/prom`).
    pub url: String,
    /// Basic-auth username. Auth is only sent when both username and
    /// password are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Basic-auth password. Never logged; wrapped in a secret type at the
    /// provider boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Seconds between alert pulls from `/api/v1/alerts`.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_workflow_dir() -> String {
    "workflows".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for KlaxonConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            workflow_dir: default_workflow_dir(),
            ingest_token: None,
            prometheus: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
