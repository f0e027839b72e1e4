//! Backend base URL resolution.
//!
//! The base URL is resolved once, when the search client is built, and the
//! resulting [`ApiEndpoints`] travel with the client from then on.

use serde::{Deserialize, Serialize};

use super::ApiConfig;

/// Used when neither configuration nor a hosting page supplies a URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Location of the page hosting the client, when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    /// Scheme, with or without the trailing colon ("https" or "https:").
    pub protocol: String,
    pub hostname: String,
}

impl PageLocation {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
        }
    }
}

/// Resolve the backend base URL.
///
/// Order: explicit `api.base_url`, then the hosting page's protocol and
/// hostname on `api.fallback_port`, then [`DEFAULT_BASE_URL`].
pub fn resolve_base_url(api: &ApiConfig, page: Option<&PageLocation>) -> String {
    if let Some(url) = api.base_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }

    if let Some(page) = page.filter(|p| !p.hostname.is_empty()) {
        let protocol = page.protocol.trim_end_matches(':');
        let protocol = if protocol.is_empty() { "http" } else { protocol };
        return format!("{}://{}:{}", protocol, page.hostname, api.fallback_port);
    }

    DEFAULT_BASE_URL.to_string()
}

/// Fully-qualified backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
    search: String,
    health: String,
}

impl ApiEndpoints {
    /// Resolve endpoints from configuration and optional page context.
    pub fn resolve(api: &ApiConfig, page: Option<&PageLocation>) -> Self {
        Self::from_base_url(&resolve_base_url(api, page))
    }

    pub fn from_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            search: format!("{}/search", base_url),
            health: format!("{}/health", base_url),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn health(&self) -> &str {
        &self.health
    }
}
