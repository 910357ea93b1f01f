use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Id reserved for the fallback item
pub const FALLBACK_ID: u32 = 0;

/// A single offerable menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogItem {
    /// Unique id (0 is reserved for the fallback)
    pub id: u32,

    /// Display name (e.g., "Peri-Peri Chicken")
    pub name: String,

    pub description: String,

    /// Price in the deployment's currency unit
    pub price: f64,

    /// Curated lowercase tags used for relevance scoring
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Category tag (e.g., "spicy", "vegan")
    pub category: String,

    /// Decorative label shown next to the name
    #[serde(default, alias = "emoji")]
    pub label: String,
}

impl CatalogItem {
    pub fn new(id: u32, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            keywords: Vec::new(),
            category: String::new(),
            label: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_ID
    }

    /// Name with the decorative label in front, as shown on a recommendation card
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.label.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.label, self.name)
        }
    }
}

/// Canned query offered when a category is picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryPreset {
    pub category: String,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let item = CatalogItem::new(3, "Dikgobe", 45.0)
            .description("Samp and beans")
            .keywords(["samp", "beans"])
            .category("traditional")
            .label("🫘");

        assert_eq!(item.keywords, vec!["samp".to_string(), "beans".to_string()]);
        assert_eq!(item.category, "traditional");
        assert!(!item.is_fallback());
    }

    #[test]
    fn display_name_skips_missing_label() {
        let plain = CatalogItem::new(1, "Dikgobe", 45.0);
        assert_eq!(plain.display_name(), "Dikgobe");

        let decorated = plain.label("🫘");
        assert_eq!(decorated.display_name(), "🫘 Dikgobe");
    }

    #[test]
    fn label_accepts_emoji_alias() {
        let item: CatalogItem = toml::from_str(
            r#"
            id = 2
            name = "Peri-Peri Chicken"
            description = "Flame-grilled"
            price = 75
            category = "spicy"
            emoji = "🔥"
            "#,
        )
        .unwrap();

        assert_eq!(item.label, "🔥");
        assert!(item.keywords.is_empty());
        assert_eq!(item.price, 75.0);
    }
}
