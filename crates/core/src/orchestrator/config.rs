//! Orchestrator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the search orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Products requested per list. Fixed per deployment, never user-driven.
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Upper bound on a single search call (milliseconds).
    /// Expiry is reported as a transport error.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_top_k() -> u32 {
    5
}

fn default_request_timeout() -> u64 {
    30_000 // 30 seconds
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl OrchestratorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
