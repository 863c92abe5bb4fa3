//! The debounced suggestion fetch state machine.
//!
//! One tokio task per session owns all mutable state. Callers interact
//! through two channels: an unbounded command channel for query updates and
//! a `watch` channel publishing every [`SuggestState`] transition. Spawned
//! fetch tasks report back through the same command channel, tagged with the
//! sequence number of the request they answer; anything but the latest
//! sequence number is dropped as stale.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use placefinder_core::{AppConfig, SuggestState, Suggestion};
use placefinder_geocode::{GeocodeClient, GeocodeError};

/// Tuning knobs for a [`SuggestSession`].
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Quiet period that must elapse after the last query change before a
    /// request fires.
    pub debounce: Duration,
    /// `(longitude, latitude)` bias hint forwarded to the service.
    pub bias: (f64, f64),
    /// Result cap forwarded to the service.
    pub max_suggestions: usize,
}

impl SessionOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            bias: (config.bias_longitude, config.bias_latitude),
            max_suggestions: config.max_suggestions,
        }
    }
}

enum Command {
    QueryChanged(String),
    FetchDone {
        seq: u64,
        result: Result<Vec<Suggestion>, GeocodeError>,
    },
    Shutdown,
}

/// Handle to a running suggestion session.
///
/// Dropping the handle shuts the task down; [`SuggestSession::shutdown`]
/// does the same and additionally waits for the task to exit.
pub struct SuggestSession {
    cmd_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<SuggestState>,
    handle: JoinHandle<()>,
}

impl SuggestSession {
    /// Spawns the session task. The initial published state is
    /// [`SuggestState::Idle`]; nothing happens until the first query update.
    #[must_use]
    pub fn spawn(client: Arc<GeocodeClient>, options: SessionOptions) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SuggestState::Idle);
        let fetch_tx = cmd_tx.clone();
        let handle = tokio::spawn(run(client, options, cmd_rx, fetch_tx, state_tx));
        Self {
            cmd_tx,
            state_rx,
            handle,
        }
    }

    /// Reports a new query value. Non-blocking; an empty query cancels any
    /// armed debounce and publishes [`SuggestState::Idle`] without issuing a
    /// request. Updates after shutdown are silently ignored.
    pub fn update_query(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(Command::QueryChanged(text.into()));
    }

    /// Returns a live view of the session state. Every transition is
    /// published; `watch` semantics mean slow readers observe the latest
    /// value rather than a backlog.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SuggestState> {
        self.state_rx.clone()
    }

    /// Stops the session task and waits for it to exit. Any armed debounce
    /// timer is discarded and in-flight responses go unobserved.
    pub async fn shutdown(mut self) {
        let _ = self.cmd_tx.send(Command::Shutdown);
        let _ = (&mut self.handle).await;
    }
}

impl Drop for SuggestSession {
    // The task keeps its own sender clone for fetch results, so closing the
    // external sender alone would never end the recv loop. An explicit
    // Shutdown command makes plain drops wind the task down too.
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(Command::Shutdown);
    }
}

async fn run(
    client: Arc<GeocodeClient>,
    options: SessionOptions,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    fetch_tx: mpsc::UnboundedSender<Command>,
    state_tx: watch::Sender<SuggestState>,
) {
    // Sequence number of the most recently issued request. Bumped when a
    // debounced request fires and when the query is cleared, so that any
    // response still in flight at that point is stale.
    let mut seq: u64 = 0;
    // Query text waiting out its debounce period, if any.
    let mut pending: Option<String> = None;
    let mut deadline = Instant::now();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(Command::QueryChanged(text)) => {
                        if text.is_empty() {
                            pending = None;
                            seq += 1;
                            let _ = state_tx.send(SuggestState::Idle);
                        } else {
                            // Re-arming the timer is the debounce: the
                            // previously scheduled fetch is discarded.
                            pending = Some(text);
                            deadline = Instant::now() + options.debounce;
                        }
                    }
                    Some(Command::FetchDone { seq: done, result }) => {
                        if done != seq {
                            tracing::debug!(done, latest = seq, "dropping stale suggest response");
                            continue;
                        }
                        match result {
                            Ok(suggestions) => {
                                let _ = state_tx.send(SuggestState::Ready(suggestions));
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "suggest request failed");
                                let _ = state_tx.send(SuggestState::Failed(e.to_string()));
                            }
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                }
            }
            () = tokio::time::sleep_until(deadline), if pending.is_some() => {
                if let Some(text) = pending.take() {
                    seq += 1;
                    let _ = state_tx.send(SuggestState::Loading);
                    dispatch_fetch(&client, &options, seq, text, &fetch_tx);
                }
            }
        }
    }
}

/// Spawns the actual suggest request for sequence number `seq`. The result
/// is routed back through the command channel; if the session is gone by
/// then, the send fails and the result is discarded.
fn dispatch_fetch(
    client: &Arc<GeocodeClient>,
    options: &SessionOptions,
    seq: u64,
    text: String,
    fetch_tx: &mpsc::UnboundedSender<Command>,
) {
    let client = Arc::clone(client);
    let bias = options.bias;
    let max_suggestions = options.max_suggestions;
    let fetch_tx = fetch_tx.clone();
    tokio::spawn(async move {
        let result = client.suggest(&text, bias, max_suggestions).await;
        let _ = fetch_tx.send(Command::FetchDone { seq, result });
    });
}
