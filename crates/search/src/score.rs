use menu_catalog::CatalogItem;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const KEYWORD_WEIGHT: f64 = 2.0;
pub const NAME_WEIGHT: f64 = 1.0;
pub const DESCRIPTION_WEIGHT: f64 = 0.5;

/// How a single item scored against a token list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    pub item_id: u32,
    /// Keyword/token pairs that overlapped (each one counts)
    pub keyword_hits: u32,
    /// Tokens found in the name
    pub name_hits: u32,
    /// Tokens found in the description
    pub description_hits: u32,
    pub score: f64,
}

/// Catalog item with its lowercased text cached for substring tests
pub(crate) struct ScoredItem<'a> {
    pub(crate) item: &'a CatalogItem,
    name: String,
    description: String,
}

impl<'a> ScoredItem<'a> {
    pub(crate) fn new(item: &'a CatalogItem) -> Self {
        Self {
            item,
            name: item.name.to_lowercase(),
            description: item.description.to_lowercase(),
        }
    }

    pub(crate) fn score(&self, tokens: &[String]) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown {
            item_id: self.item.id,
            keyword_hits: 0,
            name_hits: 0,
            description_hits: 0,
            score: 0.0,
        };

        for token in tokens {
            for keyword in &self.item.keywords {
                // Symmetric: "spic" hits "spicy" and "spiciest" hits "spic"
                if keyword.contains(token.as_str()) || token.contains(keyword.as_str()) {
                    breakdown.keyword_hits += 1;
                    breakdown.score += KEYWORD_WEIGHT;
                }
            }
            if self.name.contains(token.as_str()) {
                breakdown.name_hits += 1;
                breakdown.score += NAME_WEIGHT;
            }
            if self.description.contains(token.as_str()) {
                breakdown.description_hits += 1;
                breakdown.score += DESCRIPTION_WEIGHT;
            }
        }

        breakdown
    }
}
