//! Offline restaurant search: sanitization, tokenization and tiered
//! edit-distance matching over an already fetched restaurant set.

use crate::constants::MAX_QUERY_CHARS;
use crate::errors::ValidationError;
use crate::types::restaurant::Restaurant;

const STRIPPED_CHARS: [char; 7] = ['<', '>', '"', '\'', '`', ';', '&'];

/// Strips `<...>` tags, then the characters `< > " ' ` ; &`, then trims.
pub fn sanitize(input: &str) -> String {
    let mut without_tags = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                without_tags.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    without_tags.push_str(rest);

    without_tags
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Caps raw input at `max_chars` characters before it is sanitized.
pub fn truncate_input(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((cut, _)) => &input[..cut],
        None => input,
    }
}

/// A sanitized, non-empty query and its lowercase tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub tokens: Vec<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::parse_capped(raw, MAX_QUERY_CHARS)
    }

    pub fn parse_capped(raw: &str, max_chars: usize) -> Result<Self, ValidationError> {
        let text = sanitize(truncate_input(raw, max_chars));
        if text.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        let tokens = tokenize(&text);
        Ok(Self { text, tokens })
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Classic insert/delete/substitute distance over chars, no transpositions.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + substitution);
        }
    }
    table[a.len()][b.len()]
}

/// Edits tolerated for a token of `len` characters.
pub fn edit_threshold(len: usize) -> usize {
    match len {
        0..=3 => 0,
        4..=6 => 1,
        _ => 2,
    }
}

/// A query token matches a name token when the name contains it, or when the
/// two are within the edit threshold of the shorter token. A query token
/// containing the name token is the same case bounded by that threshold.
pub fn token_matches(query_token: &str, name_token: &str) -> bool {
    if name_token.contains(query_token) {
        return true;
    }
    let query_len = query_token.chars().count();
    let name_len = name_token.chars().count();
    let threshold = edit_threshold(query_len.min(name_len));
    if query_token.contains(name_token) {
        return query_len - name_len <= threshold;
    }
    if query_len.abs_diff(name_len) > threshold {
        return false;
    }
    levenshtein(query_token, name_token) <= threshold
}

/// Every query token has to match at least one name token.
pub fn restaurant_matches(query: &SearchQuery, restaurant: &Restaurant) -> bool {
    let name_tokens = tokenize(&restaurant.name);
    query.tokens.iter().all(|query_token| {
        name_tokens
            .iter()
            .any(|name_token| token_matches(query_token, name_token))
    })
}

/// Returns the matching restaurants in input order, or `None` when the query
/// sanitizes to nothing (no query was made).
pub fn fuzzy_match(raw_query: &str, restaurants: &[Restaurant]) -> Option<Vec<Restaurant>> {
    let query = SearchQuery::parse(raw_query).ok()?;
    Some(fuzzy_match_query(&query, restaurants))
}

pub fn fuzzy_match_query(query: &SearchQuery, restaurants: &[Restaurant]) -> Vec<Restaurant> {
    restaurants
        .iter()
        .filter(|restaurant| restaurant_matches(query, restaurant))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::coordinate::Coordinate;
    use ntest::{test_case, timeout};

    fn restaurant(id: &str, name: &str) -> Restaurant {
        Restaurant {
            id: id.into(),
            name: name.into(),
            address: None,
            location: Coordinate::new(0.0, 0.0),
            rating: None,
            cuisine_tags: None,
            price_range: None,
        }
    }

    fn names(results: &[Restaurant]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    fn fixture() -> Vec<Restaurant> {
        vec![restaurant("1", "Sushi Place"), restaurant("2", "Pizza Hut")]
    }

    #[test]
    fn sanitize_strips_tags_and_dangerous_chars() {
        assert_eq!(sanitize("  <b>Sushi</b> & 'Co'; "), "Sushi  Co");
        assert_eq!(sanitize("<script>alert(1)</script>pizza"), "alert(1)pizza");
        assert_eq!(sanitize("a < b"), "a  b");
        assert_eq!(sanitize("`\"x\"`"), "x");
    }

    #[test]
    fn stripped_only_queries_yield_no_result_set() {
        for input in ["<>", "  ;;&&  ", "<em></em>'\"`", ""] {
            assert_eq!(sanitize(input), "");
            assert_eq!(SearchQuery::parse(input), Err(ValidationError::EmptyQuery));
            assert_eq!(fuzzy_match(input, &fixture()), None);
        }
    }

    #[test]
    fn truncates_long_input_on_char_boundaries() {
        assert_eq!(truncate_input("ñandú", 3), "ñan");
        assert_eq!(truncate_input("abc", 10), "abc");
    }

    #[test]
    #[timeout(1000)]
    fn levenshtein_matches_reference_values() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("piza", "pizza"), 1);
        assert_eq!(levenshtein("pzza", "pizza"), 1);
        assert_eq!(levenshtein("pizzaaa", "pizza"), 2);
        assert_eq!(levenshtein("ab", "ba"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn threshold_tiers_by_length() {
        assert_eq!(edit_threshold(3), 0);
        assert_eq!(edit_threshold(4), 1);
        assert_eq!(edit_threshold(6), 1);
        assert_eq!(edit_threshold(7), 2);
    }

    #[test]
    fn sushi_matches_only_sushi_place() {
        let results = fuzzy_match("sushi", &fixture()).unwrap();
        assert_eq!(names(&results), vec!["Sushi Place"]);
    }

    #[test_case("piza")]
    #[test_case("pzza")]
    #[test_case("PIZZA")]
    #[test_case("pizz")]
    fn near_misses_match_pizza_hut(query: &str) {
        let results = fuzzy_match(query, &fixture()).unwrap();
        assert_eq!(names(&results), vec!["Pizza Hut"]);
    }

    #[test]
    fn two_extra_letters_exceed_the_threshold() {
        let results = fuzzy_match("pizzaaa", &fixture()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn short_tokens_need_exact_substrings() {
        assert!(!token_matches("hat", "hut"));
        assert!(token_matches("hu", "hut"));
    }

    #[test]
    fn every_query_token_must_match() {
        let data = fixture();
        assert_eq!(names(&fuzzy_match("pizza hut", &data).unwrap()), vec!["Pizza Hut"]);
        assert!(fuzzy_match("pizza place", &data).unwrap().is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let data = vec![
            restaurant("1", "Taco Town"),
            restaurant("2", "Burger Barn"),
            restaurant("3", "Taco Bell"),
        ];
        let results = fuzzy_match("taco", &data).unwrap();
        assert_eq!(names(&results), vec!["Taco Town", "Taco Bell"]);
    }
}
