//! Error taxonomy for the feed engine.
//!
//! Every failure is classified into one of three [`ErrorKind`]s: network,
//! not-found and storage. Callers branch on the kind, never on the variant.

use thiserror::Error;

/// Coarse error classification used by the fallback and logging policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Remote unreachable or returned a non-success status.
    Network,
    /// No tier of the resolution chain matched.
    NotFound,
    /// Persistent read/write failure.
    Storage,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid remote URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("remote unavailable: {0}")]
    Unavailable(String),

    #[error("concept not found: {0}")]
    NotFound(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("document encoding failed: {0}")]
    Document(#[from] serde_json::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FeedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_)
            | Self::Status { .. }
            | Self::InvalidUrl { .. }
            | Self::Unavailable(_) => ErrorKind::Network,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Sqlite(_) | Self::Document(_) | Self::Task(_) => ErrorKind::Storage,
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
