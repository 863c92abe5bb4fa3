//! Client-side fuzzy refinement of an already-fetched suggestion list.
//!
//! Pure and synchronous: never triggers a network call, only re-ranks what
//! the service already returned.

use frizbee::{match_list, Config};

use placefinder_core::Suggestion;

/// Re-ranks `suggestions` by fuzzy match against each display text.
///
/// An empty (or all-whitespace) `query` returns the list unchanged in its
/// original order. Otherwise zero-score entries are dropped and the rest are
/// ordered by descending match score, ties keeping their original order.
/// Idempotent for a fixed `(suggestions, query)` pair.
#[must_use]
pub fn refine(suggestions: &[Suggestion], query: &str) -> Vec<Suggestion> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return suggestions.to_vec();
    }

    let config = config_for_query(trimmed);
    let haystacks: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
    let matches = match_list(trimmed, &haystacks, &config);

    let mut scored: Vec<(u16, usize)> = matches
        .into_iter()
        .filter(|entry| entry.score > 0)
        .map(|entry| (entry.score, entry.index as usize))
        .collect();
    scored.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    scored
        .into_iter()
        .map(|(_, index)| suggestions[index].clone())
        .collect()
}

/// Builds matching options for the query. Typo tolerance scales with query
/// length; ranking is done by the caller so the matcher's own sort is off.
fn config_for_query(query: &str) -> Config {
    let length = query.chars().count();
    let mut allowed_typos: u16 = match length {
        0 | 1 => 0,
        2..=4 => 1,
        5..=7 => 2,
        8..=12 => 3,
        _ => 4,
    };
    if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
        allowed_typos = allowed_typos.min(max_reasonable);
    }

    let mut config = Config::default();
    config.max_typos = Some(allowed_typos);
    config.sort = false;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(text: &str, key: &str) -> Suggestion {
        Suggestion {
            text: text.to_owned(),
            magic_key: key.to_owned(),
        }
    }

    fn streets() -> Vec<Suggestion> {
        vec![
            suggestion("Main St", "K-main"),
            suggestion("Oak St", "K-oak"),
        ]
    }

    #[test]
    fn empty_query_returns_original_order() {
        let all = streets();
        let filtered = refine(&all, "");
        assert_eq!(filtered, all);
    }

    #[test]
    fn whitespace_query_returns_original_order() {
        let all = streets();
        let filtered = refine(&all, "   ");
        assert_eq!(filtered, all);
    }

    #[test]
    fn query_keeps_only_matching_entries() {
        let all = streets();
        let filtered = refine(&all, "oak");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].magic_key, "K-oak");
    }

    #[test]
    fn refine_is_idempotent() {
        let all = streets();
        let once = refine(&all, "oak");
        let twice = refine(&all, "oak");
        assert_eq!(once, twice);
    }

    #[test]
    fn no_matches_yields_empty_list() {
        let all = streets();
        let filtered = refine(&all, "zzzz");
        assert!(filtered.is_empty());
    }

    #[test]
    fn typo_ladder_caps_at_query_length() {
        let config = config_for_query("a");
        assert_eq!(config.max_typos, Some(0));
        let config = config_for_query("oak");
        assert_eq!(config.max_typos, Some(1));
        let config = config_for_query("elm street apt");
        assert_eq!(config.max_typos, Some(4));
    }
}
