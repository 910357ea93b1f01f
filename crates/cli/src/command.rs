use anyhow::Result;
use menu_catalog::{Catalog, CatalogError};
use menu_protocol::{
    CatalogOutput, ErrorEnvelope, ExplainOutput, PresetOutput, RecommendationOutput,
    ResponseMeta, TokenizeOutput,
};
use menu_search::{is_query_space, tokenize, CatalogMatcher};
use thiserror::Error;

use crate::config::{AssistantConfig, ConfigInvalid, CONFIG_ENV};

/// Failures the user can fix by changing the request
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Query must be at least {min} characters (got {got})")]
    QueryTooShort { min: usize, got: usize },

    #[error("Unknown category: {category}")]
    UnknownCategory {
        category: String,
        known: Vec<String>,
    },
}

/// Loaded catalog plus the settings every command needs
pub struct Session {
    catalog: Catalog,
    source: String,
    config: AssistantConfig,
}

impl Session {
    pub fn open(config: AssistantConfig) -> Result<Self> {
        let (catalog, source) = match &config.catalog {
            Some(path) => (Catalog::from_path(path)?, path.display().to_string()),
            None => (Catalog::builtin()?, "builtin".to_string()),
        };
        log::info!("Loaded {} menu items from {source}", catalog.len());
        Ok(Self {
            catalog,
            source,
            config,
        })
    }

    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            catalog: Some(self.source.clone()),
            items: Some(self.catalog.len()),
        }
    }

    pub fn recommend(&self, query: &str) -> Result<RecommendationOutput> {
        let query = self.gate(query)?;
        let matcher = CatalogMatcher::new(&self.catalog);
        let result = matcher.match_query(query);
        Ok(RecommendationOutput::new(
            query,
            tokenize(query),
            result,
            &self.config.currency_prefix,
        ))
    }

    pub fn explain(&self, query: &str) -> Result<ExplainOutput> {
        let query = self.gate(query)?;
        let matcher = CatalogMatcher::new(&self.catalog);
        Ok(ExplainOutput::new(query, matcher.explain(query)))
    }

    pub fn tokenize(&self, query: &str) -> TokenizeOutput {
        TokenizeOutput {
            query: query.to_string(),
            tokens: tokenize(query),
        }
    }

    pub fn catalog(&self, category: Option<&str>) -> Result<CatalogOutput> {
        if let Some(category) = category {
            if self.catalog.first_in_category(category).is_none() {
                return Err(self.unknown_category(category).into());
            }
        }
        Ok(CatalogOutput::new(&self.catalog, category))
    }

    /// Runs the canned query for `category` without the length gate
    pub fn preset(&self, category: &str) -> Result<PresetOutput> {
        let query = self
            .catalog
            .preset_query(category)
            .ok_or_else(|| self.unknown_category(category))?;
        log::debug!("Preset query for {category}: {query}");

        let matcher = CatalogMatcher::new(&self.catalog);
        Ok(PresetOutput {
            category: category.to_string(),
            recommendation: RecommendationOutput::new(
                query,
                tokenize(query),
                matcher.match_query(query),
                &self.config.currency_prefix,
            ),
        })
    }

    /// Length is measured in UTF-16 code units, so "hot🔥" counts as 5
    fn gate<'q>(&self, query: &'q str) -> Result<&'q str, CommandError> {
        let query = query.trim_matches(is_query_space);
        let got = query.encode_utf16().count();
        if got < self.config.min_query_chars {
            return Err(CommandError::QueryTooShort {
                min: self.config.min_query_chars,
                got,
            });
        }
        Ok(query)
    }

    fn unknown_category(&self, category: &str) -> CommandError {
        CommandError::UnknownCategory {
            category: category.to_string(),
            known: self
                .catalog
                .presets()
                .iter()
                .map(|preset| preset.category.clone())
                .collect(),
        }
    }
}

/// Maps an error to a stable code and an optional hint for the JSON envelope
pub fn classify_error(err: &anyhow::Error) -> ErrorEnvelope {
    let message = format!("{err:#}");
    if let Some(cmd) = err.downcast_ref::<CommandError>() {
        return match cmd {
            CommandError::QueryTooShort { .. } => ErrorEnvelope {
                code: "query_too_short".to_string(),
                message,
                hint: Some("Describe what you feel like eating in a few words".to_string()),
            },
            CommandError::UnknownCategory { known, .. } => ErrorEnvelope {
                code: "unknown_category".to_string(),
                message,
                hint: (!known.is_empty()).then(|| format!("Try one of: {}", known.join(", "))),
            },
        };
    }
    if err.downcast_ref::<CatalogError>().is_some() {
        return ErrorEnvelope {
            code: "catalog_invalid".to_string(),
            message,
            hint: Some("Check the catalog file passed with --catalog".to_string()),
        };
    }
    if err.downcast_ref::<ConfigInvalid>().is_some() {
        return ErrorEnvelope {
            code: "config_invalid".to_string(),
            message,
            hint: Some(format!("Fix or unset the file named by {CONFIG_ENV}")),
        };
    }
    ErrorEnvelope {
        code: "internal".to_string(),
        message,
        hint: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::open(AssistantConfig::default()).unwrap()
    }

    #[test]
    fn short_queries_are_refused() {
        let err = session().recommend("  hot ").unwrap_err();
        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "query_too_short");
        assert!(envelope.message.contains("at least 5"));
    }

    #[test]
    fn length_counts_utf16_units() {
        let output = session().recommend(" hot🔥 ").unwrap();
        assert_eq!(output.query, "hot🔥");
        assert_eq!(output.item.id, 1);

        let err = session().recommend("hot\u{feff}").unwrap_err();
        assert_eq!(classify_error(&err).code, "query_too_short");
    }

    #[test]
    fn recommend_trims_query() {
        let output = session().recommend("   spicy food  ").unwrap();
        assert_eq!(output.query, "spicy food");
        assert_eq!(output.item.id, 1);
    }

    #[test]
    fn unknown_category_lists_known_ones() {
        let err = session().preset("desserts").unwrap_err();
        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "unknown_category");
        assert_eq!(
            envelope.hint.as_deref(),
            Some("Try one of: spicy, vegan, family, traditional, fatcakes")
        );
    }

    #[test]
    fn catalog_errors_are_classified() {
        let err = Session::open(AssistantConfig {
            catalog: Some("/definitely/missing/menu.toml".into()),
            ..Default::default()
        })
        .err()
        .expect("missing catalog must fail");
        assert_eq!(classify_error(&err).code, "catalog_invalid");
    }

    #[test]
    fn preset_skips_length_gate() {
        let session = Session::open(AssistantConfig {
            min_query_chars: 500,
            ..Default::default()
        })
        .unwrap();
        let output = session.preset("vegan").unwrap();
        assert_eq!(output.recommendation.item.id, 3);
    }
}
