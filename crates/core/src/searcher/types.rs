//! Types for the product search backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::{null_as_default, InventoryStatus, Product};

/// Body of a search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Augmented query (filters already folded in).
    pub query: String,
    /// Number of products requested per list.
    pub top_k: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: u32) -> Self {
        Self {
            query: query.into(),
            top_k,
        }
    }
}

/// Backend answer, split by availability.
///
/// Missing or `null` lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_in_stock_products: Vec<Product>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_out_of_stock_products: Vec<Product>,
}

impl SearchResponse {
    pub fn new(in_stock: Vec<Product>, out_of_stock: Vec<Product>) -> Self {
        Self {
            recommended_in_stock_products: in_stock,
            recommended_out_of_stock_products: out_of_stock,
        }
    }

    /// Stamp products that carry no stock status with the status implied
    /// by the list they arrived in. Order and membership are unchanged.
    pub fn with_inferred_inventory(mut self) -> Self {
        for product in &mut self.recommended_in_stock_products {
            product
                .inventory_status
                .get_or_insert(InventoryStatus::InStock);
        }
        for product in &mut self.recommended_out_of_stock_products {
            product
                .inventory_status
                .get_or_insert(InventoryStatus::OutOfStock);
        }
        self
    }

    pub fn total(&self) -> usize {
        self.recommended_in_stock_products.len() + self.recommended_out_of_stock_products.len()
    }
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
}

/// Errors that can occur during search operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Search backend returned HTTP {status}")]
    Http { status: u16 },

    #[error("Search backend unreachable: {0}")]
    Transport(String),

    #[error("Failed to parse search response: {0}")]
    Parse(String),
}

/// Coarse classification of [`SearchError`], for logs, metrics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchErrorKind {
    Http,
    Transport,
    Parse,
}

impl SearchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchErrorKind::Http => "http_error",
            SearchErrorKind::Transport => "transport_error",
            SearchErrorKind::Parse => "parse_error",
        }
    }
}

impl SearchError {
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::Http { .. } => SearchErrorKind::Http,
            SearchError::Transport(_) => SearchErrorKind::Transport,
            SearchError::Parse(_) => SearchErrorKind::Parse,
        }
    }
}

/// Trait for product search backends.
#[async_trait]
pub trait ProductSearcher: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Execute one search. No retries, no caching.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;

    /// Liveness probe. Failures of any kind read as `false`.
    async fn health(&self) -> bool;
}
