/// Tokens at or below this length carry no signal ("a", "is", "im")
pub const MIN_TOKEN_LEN: usize = 3;

/// Split a free-text query into lowercase, punctuation-free terms.
///
/// Only ASCII letters, digits, `_` and whitespace survive the punctuation strip,
/// so accented letters are dropped rather than folded ("sautéed" -> "sauted").
#[must_use]
pub fn tokenize(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || is_query_space(*c))
        .collect();

    cleaned
        .split(is_query_space)
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whitespace that separates query words.
///
/// Unicode `White_Space` minus NEL (U+0085), plus the BOM / zero-width
/// no-break space (U+FEFF).
#[must_use]
pub fn is_query_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_punctuation_and_short_words() {
        assert_eq!(
            tokenize("I'm craving something spicy!"),
            vec!["craving", "something", "spicy"]
        );
    }

    #[test]
    fn apostrophes_join_words() {
        // "chef's" loses the apostrophe instead of splitting into "chef" + "s"
        assert_eq!(tokenize("Chef's choice"), vec!["chefs", "choice"]);
    }

    #[test]
    fn hyphens_join_words() {
        assert_eq!(tokenize("peri-peri please"), vec!["periperi", "please"]);
    }

    #[test]
    fn empty_and_noise_queries_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("a b").is_empty());
        assert!(tokenize("!!.").is_empty());
        assert!(tokenize("   \t\n ").is_empty());
    }

    #[test]
    fn zero_width_no_break_space_separates_words() {
        assert_eq!(tokenize("spicy\u{feff}vegan"), vec!["spicy", "vegan"]);
        assert!(is_query_space('\u{feff}'));
    }

    #[test]
    fn next_line_control_is_not_a_separator() {
        assert_eq!(tokenize("spicy\u{85}vegan"), vec!["spicyvegan"]);
        assert!(!is_query_space('\u{85}'));
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(tokenize("grill_for 400 people"), vec!["grill_for", "400", "people"]);
    }

    #[test]
    fn non_ascii_letters_are_removed() {
        assert_eq!(tokenize("sautéed morogo"), vec!["sauted", "morogo"]);
        assert!(tokenize("日本語").is_empty());
    }

    proptest! {
        #[test]
        fn proptest_tokens_are_long_lowercase_words(query in "\\PC{0,64}") {
            for token in tokenize(&query) {
                prop_assert!(token.len() >= MIN_TOKEN_LEN);
                prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            }
        }

        #[test]
        fn proptest_tokenize_is_case_insensitive(query in "[A-Za-z ,.!?']{0,48}") {
            prop_assert_eq!(tokenize(&query), tokenize(&query.to_uppercase()));
        }
    }
}
