use menu_catalog::{Catalog, CatalogItem};
use serde::Serialize;

use crate::score::{ScoreBreakdown, ScoredItem};
use crate::tokenizer::tokenize;

/// Minimum score for a catalog item to be recommended over the fallback
pub const CONFIDENCE_THRESHOLD: f64 = 1.0;

/// Chosen item and its relevance score.
///
/// A score of 0 paired with the fallback means "no confident match".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub item: &'a CatalogItem,
    pub score: f64,
}

impl MatchResult<'_> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.item.is_fallback()
    }
}

/// Full scoring trace for a query
#[derive(Debug, Clone, Serialize)]
pub struct Explanation<'a> {
    pub tokens: Vec<String>,
    /// One entry per catalog item, in catalog order
    pub scores: Vec<ScoreBreakdown>,
    pub result: MatchResult<'a>,
}

/// Maps free-text queries to the best catalog item by keyword overlap
pub struct CatalogMatcher<'a> {
    catalog: &'a Catalog,
    items: Vec<ScoredItem<'a>>,
}

impl<'a> CatalogMatcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            items: catalog.items().iter().map(ScoredItem::new).collect(),
        }
    }

    /// Best item for `query`, or the fallback when nothing scores at least
    /// [`CONFIDENCE_THRESHOLD`]. Never fails.
    #[must_use]
    pub fn match_query(&self, query: &str) -> MatchResult<'a> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            log::debug!("No usable tokens in query, using fallback");
            return self.fallback();
        }

        self.pick(
            self.items
                .iter()
                .map(|scored| (scored.item, scored.score(&tokens).score)),
        )
    }

    /// Same decision as [`Self::match_query`], with the per-item breakdown
    #[must_use]
    pub fn explain(&self, query: &str) -> Explanation<'a> {
        let tokens = tokenize(query);
        let scores: Vec<ScoreBreakdown> = self
            .items
            .iter()
            .map(|scored| scored.score(&tokens))
            .collect();

        let result = if tokens.is_empty() {
            self.fallback()
        } else {
            self.pick(
                self.items
                    .iter()
                    .zip(&scores)
                    .map(|(scored, breakdown)| (scored.item, breakdown.score)),
            )
        };

        Explanation {
            tokens,
            scores,
            result,
        }
    }

    fn pick<I>(&self, candidates: I) -> MatchResult<'a>
    where
        I: IntoIterator<Item = (&'a CatalogItem, f64)>,
    {
        let mut best = None;
        let mut highest = 0.0;
        for (item, score) in candidates {
            // Strict comparison keeps the earliest item on ties
            if score > highest {
                highest = score;
                best = Some(item);
            }
        }

        match best {
            Some(item) if highest >= CONFIDENCE_THRESHOLD => {
                log::debug!("Matched item {} with score {highest}", item.id);
                MatchResult {
                    item,
                    score: highest,
                }
            }
            _ => {
                log::debug!("Top score {highest} below threshold, using fallback");
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> MatchResult<'a> {
        MatchResult {
            item: self.catalog.fallback(),
            score: 0.0,
        }
    }
}
