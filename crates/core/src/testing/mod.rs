//! Testing utilities and mock implementations.
//!
//! This module provides a mock of the search backend trait, allowing the
//! orchestrator to be exercised without a running recommendation service.
//!
//! # Example
//!
//! ```rust,ignore
//! use stylefinder_core::testing::{fixtures, MockProductSearcher};
//!
//! let searcher = Arc::new(MockProductSearcher::new());
//! searcher.set_delay_for("slow", Duration::from_millis(200)).await;
//!
//! let orchestrator = SearchOrchestrator::new(OrchestratorConfig::default(), searcher.clone());
//! ```

mod mock_searcher;

pub use mock_searcher::{MockProductSearcher, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::collections::HashMap;

    use crate::product::{InventoryStatus, Product, ProductId, ProductImage};
    use crate::searcher::SearchResponse;

    /// Create a test product with reasonable defaults and no stock status.
    pub fn product(id: &str, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: None,
            currency: None,
            images: HashMap::from([(
                "main".to_string(),
                ProductImage::Url(format!("https://images.example.com/{}.jpg", id)),
            )]),
            average_rating: Some(4.2),
            rating_number: Some(128),
            reason: None,
            details: serde_json::Map::new(),
            inventory_status: None,
            features: Vec::new(),
            description: String::new(),
            store: "Example Store".to_string(),
            categories: vec!["Clothing".to_string()],
            similarity: None,
        }
    }

    /// Create a priced, in-stock test product.
    pub fn in_stock_product(id: &str, title: &str, price: f64) -> Product {
        let mut product = product(id, title);
        product.price = Some(price);
        product.currency = Some("USD".to_string());
        product.inventory_status = Some(InventoryStatus::InStock);
        product.reason = Some(format!("{} matches the requested style.", title));
        product
    }

    /// Create an unpriced, out-of-stock test product.
    pub fn out_of_stock_product(id: &str, title: &str) -> Product {
        let mut product = product(id, title);
        product.inventory_status = Some(InventoryStatus::OutOfStock);
        product
    }

    /// Create a search response from the two lists.
    pub fn response(in_stock: Vec<Product>, out_of_stock: Vec<Product>) -> SearchResponse {
        SearchResponse::new(in_stock, out_of_stock)
    }
}
