use serde::{Deserialize, Serialize};

use crate::orchestrator::OrchestratorConfig;
use crate::validation::MatchMode;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Search backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Explicit backend base URL (e.g., "http://localhost:8000").
    /// Takes precedence over any page-derived URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Port used when the base URL is derived from the hosting page.
    #[serde(default = "default_fallback_port")]
    pub fallback_port: u16,
    /// HTTP client timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            fallback_port: default_fallback_port(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_fallback_port() -> u16 {
    8001
}

fn default_timeout() -> u32 {
    30
}

/// Content policy applied by the query validator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Replaces the built-in harmful term list when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmful_terms: Option<Vec<String>>,
    /// Appended to whichever list is in effect.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_terms: Vec<String>,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Maximum query length in characters.
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            harmful_terms: None,
            extra_terms: Vec::new(),
            match_mode: MatchMode::default(),
            max_query_chars: default_max_query_chars(),
        }
    }
}

fn default_max_query_chars() -> usize {
    crate::validation::MAX_QUERY_CHARS
}
