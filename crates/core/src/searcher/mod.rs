//! Product search abstraction.
//!
//! This module provides a `ProductSearcher` trait for calling the
//! recommendation backend, plus the reqwest-based [`HttpSearchClient`].

mod http;
mod types;

pub use http::HttpSearchClient;
pub use types::*;
