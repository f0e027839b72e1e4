//! Filter-to-query augmentation.

mod builder;
mod filters;

pub use builder::build_query;
pub use filters::{AgeRange, ColorStyle, Gender, SearchFilters, UnknownFilterValue};
