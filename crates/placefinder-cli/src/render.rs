//! Plain-text rendering of session states for the terminal.

use placefinder_core::{SuggestState, Suggestion};

pub const EMPTY_QUERY_PROMPT: &str = "You have to enter a search query";
pub const NO_RESULTS: &str = "No Addresses found";
pub const LOADING: &str = "Loading...";

pub fn suggestion_row(index: usize, suggestion: &Suggestion) -> String {
    format!(
        "{:>2}. {}  [{}]",
        index + 1,
        suggestion.text,
        suggestion.magic_key
    )
}

/// Renders a session state as the lines a dropdown would show.
pub fn state_lines(state: &SuggestState) -> Vec<String> {
    match state {
        SuggestState::Idle => vec![EMPTY_QUERY_PROMPT.to_owned()],
        SuggestState::Loading => vec![LOADING.to_owned()],
        SuggestState::Failed(message) => vec![format!("Error! {message}")],
        SuggestState::Ready(suggestions) if suggestions.is_empty() => {
            vec![NO_RESULTS.to_owned()]
        }
        SuggestState::Ready(suggestions) => suggestions
            .iter()
            .enumerate()
            .map(|(index, s)| suggestion_row(index, s))
            .collect(),
    }
}

/// Parses a `/N` selection line into a zero-based suggestion index.
pub fn parse_selection(line: &str) -> Option<usize> {
    let number = line.strip_prefix('/')?;
    let one_based: usize = number.trim().parse().ok()?;
    one_based.checked_sub(1)
}
