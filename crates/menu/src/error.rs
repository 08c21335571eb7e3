// ABOUTME: Error types for navigation, fetching, and browsing sessions.
// ABOUTME: NavigationError is always recoverable; SessionError wraps fetch and feed failures.

use rsspager_feed::FeedError;
use thiserror::Error;

use crate::token::EntryKind;

/// A selection token that can't be applied to the active view.
///
/// None of these change navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown selection token {0:?}")]
    UnknownToken(String),

    #[error("{kind} index {index} is out of range ({len} entries)")]
    OutOfRange {
        kind: EntryKind,
        index: usize,
        len: usize,
    },

    /// A positional token from a view that is no longer active.
    #[error("{kind} selection is not valid in the current view")]
    WrongView { kind: EntryKind },
}

/// Failure reported by a fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid feed url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        FetchError::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

/// Why adding a feed to a session failed.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("feed from {origin} was rejected: {source}")]
    Feed {
        origin: String,
        #[source]
        source: FeedError,
    },
}
