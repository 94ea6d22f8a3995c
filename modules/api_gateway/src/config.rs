use serde::{Deserialize, Serialize};

/// Gateway settings, read from the `api_gateway` module section of the
/// application config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Expose `/openapi.json` and the `/docs` UI.
    #[serde(default)]
    pub enable_docs: bool,

    /// Enable permissive CORS.
    #[serde(default)]
    pub cors_enabled: bool,

    /// Per-request handler timeout in seconds.
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_timeout_sec() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enable_docs: false,
            cors_enabled: false,
            timeout_sec: default_timeout_sec(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}
