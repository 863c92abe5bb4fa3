//! Interactive search loop: each stdin line is the new query, session state
//! transitions print as they are published, and `/N` resolves suggestion N
//! from the last successful fetch.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use placefinder_core::{AppConfig, SuggestState, Suggestion};
use placefinder_geocode::GeocodeClient;
use placefinder_search::{refine, SessionOptions, SuggestSession};

use crate::render;

pub async fn run(client: Arc<GeocodeClient>, config: &AppConfig) -> anyhow::Result<()> {
    let session = SuggestSession::spawn(Arc::clone(&client), SessionOptions::from_config(config));
    let mut state_rx = session.subscribe();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    println!("placefinder — type a query, /N to pick suggestion N, /quit to exit");
    println!("{}", render::EMPTY_QUERY_PROMPT);

    let mut current_query = String::new();
    let mut last_ready: Vec<Suggestion> = Vec::new();

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                let state = apply_refinement(state, config, &current_query);
                if let SuggestState::Ready(ref suggestions) = state {
                    last_ready = suggestions.clone();
                }
                for line in render::state_lines(&state) {
                    println!("{line}");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim().to_owned();
                if line == "/quit" {
                    break;
                }
                if let Some(index) = render::parse_selection(&line) {
                    resolve_selection(&client, &last_ready, index).await;
                    continue;
                }
                if line.is_empty() {
                    println!("{}", render::EMPTY_QUERY_PROMPT);
                }
                current_query = line.clone();
                session.update_query(line);
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

/// Applies the local fuzzy filter to `Ready` states when the toggle is on.
fn apply_refinement(state: SuggestState, config: &AppConfig, query: &str) -> SuggestState {
    match state {
        SuggestState::Ready(suggestions) if config.refine_locally => {
            SuggestState::Ready(refine(&suggestions, query))
        }
        other => other,
    }
}

/// Resolves the selected suggestion and prints the confirmation, or an
/// explicit error. A failed resolve is never silently dropped.
async fn resolve_selection(client: &GeocodeClient, suggestions: &[Suggestion], index: usize) {
    let Some(suggestion) = suggestions.get(index) else {
        println!("no suggestion number {} to pick", index + 1);
        return;
    };
    match client.resolve(suggestion).await {
        Ok(resolved) => println!("{resolved}"),
        Err(e) => {
            tracing::error!(error = %e, magic_key = %suggestion.magic_key, "resolve failed");
            println!("Error! {e}");
        }
    }
}
