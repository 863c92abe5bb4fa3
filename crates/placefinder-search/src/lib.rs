//! Debounced address-suggestion session and local refinement filter.
//!
//! [`SuggestSession`] owns the suggestion fetch state machine: query changes
//! are coalesced through a debounce timer, at most one request fires per
//! burst of edits, and responses are sequence-numbered so a slow stale
//! response can never overwrite the result of a newer request. [`refine`]
//! re-ranks an already-fetched suggestion list by fuzzy match, purely on the
//! client side.

mod refine;
mod session;

pub use refine::refine;
pub use session::{SessionOptions, SuggestSession};
