use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::model::{CatalogItem, CategoryPreset, FALLBACK_ID};

const BUILTIN_BOTSWANA: &str = include_str!("../../../menus/botswana.toml");

/// Immutable, ordered menu owned by the matcher for its lifetime.
///
/// Item order is significant: ties during matching go to the earlier item.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    fallback: CatalogItem,
    presets: Vec<CategoryPreset>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    fallback: CatalogItem,
    #[serde(default)]
    items: Vec<CatalogItem>,
    #[serde(default)]
    presets: Vec<CategoryPreset>,
}

impl Catalog {
    pub fn new(
        mut items: Vec<CatalogItem>,
        mut fallback: CatalogItem,
        presets: Vec<CategoryPreset>,
    ) -> Result<Self> {
        for item in items.iter_mut().chain(std::iter::once(&mut fallback)) {
            // Fold -0.0 into 0.0
            item.price += 0.0;
        }

        validate_fallback(&fallback)?;
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if item.id == FALLBACK_ID {
                return Err(CatalogError::ReservedId {
                    name: item.name.clone(),
                });
            }
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            validate_item(item)?;
        }

        for preset in &presets {
            if !items.iter().any(|item| item.category == preset.category) {
                return Err(CatalogError::UnknownPresetCategory(
                    preset.category.clone(),
                ));
            }
        }

        log::debug!(
            "Catalog ready: {} items, {} presets",
            items.len(),
            presets.len()
        );

        Ok(Self {
            items,
            fallback,
            presets,
        })
    }

    /// The menu shipped with the assistant
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_BOTSWANA)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(raw)?;
        Self::new(raw.items, raw.fallback, raw.presets)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Loading catalog from {}", path.display());
        Self::from_toml_str(&raw)
    }

    /// Items in declaration order
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn fallback(&self) -> &CatalogItem {
        &self.fallback
    }

    #[must_use]
    pub fn presets(&self) -> &[CategoryPreset] {
        &self.presets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id; id 0 resolves to the fallback
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&CatalogItem> {
        if id == FALLBACK_ID {
            return Some(&self.fallback);
        }
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn first_in_category(&self, category: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.category == category)
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Distinct categories in first-seen order
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Canned query for a category, only when some item is actually in it
    #[must_use]
    pub fn preset_query(&self, category: &str) -> Option<&str> {
        self.first_in_category(category)?;
        self.presets
            .iter()
            .find(|preset| preset.category == category)
            .map(|preset| preset.query.as_str())
    }
}

fn validate_fallback(fallback: &CatalogItem) -> Result<()> {
    if fallback.id != FALLBACK_ID {
        return Err(CatalogError::FallbackId(fallback.id));
    }
    if !fallback.keywords.is_empty() {
        return Err(CatalogError::FallbackKeywords);
    }
    validate_item(fallback)
}

fn validate_item(item: &CatalogItem) -> Result<()> {
    if item.name.trim().is_empty() {
        return Err(CatalogError::EmptyName { id: item.id });
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(CatalogError::InvalidPrice {
            id: item.id,
            price: item.price,
        });
    }
    for keyword in &item.keywords {
        if keyword.is_empty() {
            return Err(CatalogError::EmptyKeyword { id: item.id });
        }
        if keyword.to_lowercase() != *keyword {
            return Err(CatalogError::KeywordCase {
                id: item.id,
                keyword: keyword.clone(),
            });
        }
    }
    Ok(())
}
