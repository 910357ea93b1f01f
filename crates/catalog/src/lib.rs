mod catalog;
mod error;
mod model;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use model::{CatalogItem, CategoryPreset, FALLBACK_ID};
