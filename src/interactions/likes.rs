//! Optimistic likes.
//!
//! The server owns the like counter. Locally each concept carries a
//! `{liked, delta}` overlay that updates immediately on toggle; the remote
//! toggle is fired afterwards and its answer is not merged back. Overlays
//! are dropped by [`LikeStore::reconcile`] when the catalog is reloaded.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::remote::RemoteContentService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LikeState {
    /// Last counter fetched from the server, if any.
    pub server_count: Option<u64>,
    pub liked: bool,
    pub delta: i64,
}

impl LikeState {
    /// Server counter plus the local delta, never negative.
    pub fn display_count(&self) -> u64 {
        let base = self.server_count.unwrap_or(0) as i64;
        (base + self.delta).max(0) as u64
    }
}

/// Result of [`LikeStore::toggle_like`].
#[derive(Debug)]
pub struct LikeToggled {
    pub state: LikeState,
    /// The in-flight remote toggle. Dropping the handle detaches it.
    pub request: JoinHandle<()>,
}

pub struct LikeStore {
    remote: Arc<dyn RemoteContentService>,
    user_id: u64,
    states: Mutex<HashMap<String, LikeState>>,
}

impl LikeStore {
    pub fn new(remote: Arc<dyn RemoteContentService>, user_id: u64) -> Self {
        Self {
            remote,
            user_id,
            states: Mutex::new(HashMap::new()),
        }
    }

    pub fn state(&self, id: &str) -> LikeState {
        self.states
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    /// Flip the local like and adjust the delta, then fire the remote toggle.
    /// Must be called from within a Tokio runtime.
    pub fn toggle_like(&self, id: &str) -> LikeToggled {
        let state = {
            let mut states = self.states.lock().unwrap_or_else(|p| p.into_inner());
            let state = states.entry(id.to_string()).or_default();
            state.liked = !state.liked;
            state.delta += if state.liked { 1 } else { -1 };
            *state
        };

        let remote = Arc::clone(&self.remote);
        let user_id = self.user_id;
        let concept_id = id.to_string();
        let request = tokio::spawn(async move {
            match remote.toggle_like(user_id, &concept_id).await {
                Ok(liked) => tracing::debug!(id = %concept_id, liked, "remote like toggled"),
                Err(e) => tracing::warn!(id = %concept_id, error = %e, "remote like toggle failed"),
            }
        });

        LikeToggled { state, request }
    }

    /// Fetch the server counter for `id` and cache it under the overlay.
    pub async fn fetch_count(&self, id: &str) -> Result<LikeState> {
        let count = self.remote.like_count(id).await?;
        let mut states = self.states.lock().unwrap_or_else(|p| p.into_inner());
        let state = states.entry(id.to_string()).or_default();
        state.server_count = Some(count);
        Ok(*state)
    }

    /// Drop every overlay and cached counter.
    pub fn reconcile(&self) {
        let mut states = self.states.lock().unwrap_or_else(|p| p.into_inner());
        tracing::debug!(overlays = states.len(), "like overlays reconciled");
        states.clear();
    }
}
