use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog has no items")]
    Empty,

    #[error("Duplicate item id: {0}")]
    DuplicateId(u32),

    #[error("Item id 0 is reserved for the fallback (item {name:?})")]
    ReservedId { name: String },

    #[error("Fallback item must use id 0, found {0}")]
    FallbackId(u32),

    #[error("Fallback item must not carry keywords")]
    FallbackKeywords,

    #[error("Item {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("Item {id} has an invalid price: {price}")]
    InvalidPrice { id: u32, price: f64 },

    #[error("Item {id} has an empty keyword")]
    EmptyKeyword { id: u32 },

    #[error("Item {id} keyword {keyword:?} must be lowercase")]
    KeywordCase { id: u32, keyword: String },

    #[error("Preset references unknown category: {0}")]
    UnknownPresetCategory(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
