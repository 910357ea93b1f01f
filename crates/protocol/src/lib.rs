use anyhow::Result;
use menu_catalog::{Catalog, CatalogItem};
use menu_search::{Explanation, MatchResult, ScoreBreakdown};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod order;

pub use order::{format_price, order_message, DEFAULT_CURRENCY_PREFIX};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, JsonSchema)]
pub struct ResponseMeta {
    /// Where the catalog came from ("builtin" or a file path)
    pub catalog: Option<String>,
    pub items: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ResponseEnvelope {
    pub schema_version: u32,
    pub status: ResponseStatus,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl ResponseEnvelope {
    pub fn ok<T: Serialize>(data: &T, meta: ResponseMeta) -> Result<Self> {
        Ok(Self {
            schema_version: SCHEMA_VERSION,
            status: ResponseStatus::Ok,
            data: serde_json::to_value(data)?,
            error: None,
            meta,
        })
    }

    #[must_use]
    pub fn error(error: ErrorEnvelope, meta: ResponseMeta) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            status: ResponseStatus::Error,
            data: serde_json::Value::Null,
            error: Some(error),
            meta,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct RecommendationOutput {
    pub query: String,
    pub tokens: Vec<String>,
    pub item: CatalogItem,
    pub score: f64,
    /// True when no item reached the confidence threshold
    pub fallback: bool,
    pub display_name: String,
    pub price: String,
    pub order_message: String,
}

impl RecommendationOutput {
    #[must_use]
    pub fn new(
        query: &str,
        tokens: Vec<String>,
        result: MatchResult<'_>,
        currency_prefix: &str,
    ) -> Self {
        Self {
            query: query.to_string(),
            tokens,
            item: result.item.clone(),
            score: result.score,
            fallback: result.is_fallback(),
            display_name: result.item.display_name(),
            price: format_price(result.item.price, currency_prefix),
            order_message: order_message(result.item, currency_prefix),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ExplainOutput {
    pub query: String,
    pub tokens: Vec<String>,
    pub scores: Vec<ScoreBreakdown>,
    pub chosen_id: u32,
    pub score: f64,
    pub fallback: bool,
}

impl ExplainOutput {
    #[must_use]
    pub fn new(query: &str, explanation: Explanation<'_>) -> Self {
        Self {
            query: query.to_string(),
            chosen_id: explanation.result.item.id,
            score: explanation.result.score,
            fallback: explanation.result.is_fallback(),
            tokens: explanation.tokens,
            scores: explanation.scores,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct TokenizeOutput {
    pub query: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CatalogOutput {
    pub categories: Vec<String>,
    pub items: Vec<CatalogItem>,
    pub fallback: CatalogItem,
}

impl CatalogOutput {
    /// All items, or only those in `category`
    #[must_use]
    pub fn new(catalog: &Catalog, category: Option<&str>) -> Self {
        let items = match category {
            Some(category) => catalog.in_category(category).cloned().collect(),
            None => catalog.items().to_vec(),
        };
        Self {
            categories: catalog
                .categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            items,
            fallback: catalog.fallback().clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct PresetOutput {
    pub category: String,
    pub recommendation: RecommendationOutput,
}

/// JSON schemas for the envelope and every payload it can carry
pub fn schemas() -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "envelope": serde_json::to_value(schemars::schema_for!(ResponseEnvelope))?,
        "recommendation": serde_json::to_value(schemars::schema_for!(RecommendationOutput))?,
        "explain": serde_json::to_value(schemars::schema_for!(ExplainOutput))?,
        "tokenize": serde_json::to_value(schemars::schema_for!(TokenizeOutput))?,
        "catalog": serde_json::to_value(schemars::schema_for!(CatalogOutput))?,
        "preset": serde_json::to_value(schemars::schema_for!(PresetOutput))?,
    }))
}
