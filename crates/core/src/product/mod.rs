//! Product data model.

mod types;

pub(crate) use types::null_as_default;
pub use types::{ImageVariants, InventoryStatus, PriceDisplay, Product, ProductId, ProductImage};
