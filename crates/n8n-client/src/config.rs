//! Connection configuration for the n8n backend.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// n8n connection settings.
///
/// Environment variables are prefixed with `N8N_`:
/// - `N8N_BASE_URL`: Backend base URL (default: "http://localhost:5678")
/// - `N8N_API_KEY`: API key sent as `X-N8N-API-KEY` (default: empty)
/// - `N8N_WORKFLOW_ID`: Workflow used when a call does not name one (default: empty)
/// - `N8N_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)
#[derive(Clone, Deserialize)]
pub struct N8nConfig {
    /// Backend base URL, without the `/api/v1` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key. Empty means requests go out unauthenticated.
    #[serde(default)]
    pub api_key: String,

    /// Default workflow id.
    #[serde(default)]
    pub workflow_id: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5678".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl N8nConfig {
    /// Build a configuration from explicit values.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        workflow_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            workflow_id: workflow_id.into(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Load configuration from environment variables prefixed with `N8N_`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("N8N_").from_env::<N8nConfig>()
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// True when both an API key and a workflow id are set.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.workflow_id.is_empty()
    }
}

impl Default for N8nConfig {
    fn default() -> Self {
        Self::new(default_base_url(), "", "")
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for N8nConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("N8nConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("workflow_id", &self.workflow_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = N8nConfig::default();
        assert_eq!(config.base_url, "http://localhost:5678");
        assert!(config.api_key.is_empty());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.is_configured());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = N8nConfig::new("http://n8n.local", "super-secret", "wf-1");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_config_from_vars() {
        let vars = vec![
            ("N8N_BASE_URL".to_string(), "https://n8n.example.com".to_string()),
            ("N8N_WORKFLOW_ID".to_string(), "abc123".to_string()),
        ];
        let config: N8nConfig = envy::prefixed("N8N_").from_iter(vars).unwrap();
        assert_eq!(config.base_url, "https://n8n.example.com");
        assert_eq!(config.workflow_id, "abc123");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
