mod matcher;
mod score;
mod tokenizer;

pub use matcher::{CatalogMatcher, Explanation, MatchResult, CONFIDENCE_THRESHOLD};
pub use score::{ScoreBreakdown, DESCRIPTION_WEIGHT, KEYWORD_WEIGHT, NAME_WEIGHT};
pub use tokenizer::{is_query_space, tokenize, MIN_TOKEN_LEN};
