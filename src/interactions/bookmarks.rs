use std::collections::BTreeSet;
use std::sync::Arc;

use crate::db::documents::{DocumentCell, DocumentStore};

/// Set of bookmarked canonical ids, persisted as a JSON array.
pub struct BookmarkStore {
    doc: DocumentCell<BTreeSet<String>>,
}

impl BookmarkStore {
    pub async fn open(store: Arc<dyn DocumentStore>, key: &str) -> Self {
        Self {
            doc: DocumentCell::open(store, key).await,
        }
    }

    /// Add `id` if absent, remove it if present. Returns whether it is
    /// bookmarked afterwards.
    pub async fn toggle(&self, id: &str) -> bool {
        let bookmarked = self
            .doc
            .update(|set| {
                if set.remove(id) {
                    false
                } else {
                    set.insert(id.to_string());
                    true
                }
            })
            .await;
        tracing::debug!(id, bookmarked, "bookmark toggled");
        bookmarked
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.doc.read(|set| set.contains(id))
    }

    pub fn list(&self) -> Vec<String> {
        self.doc.read(|set| set.iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.doc.read(|set| set.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-read the persisted set.
    pub async fn reload(&self) {
        self.doc.reload().await;
    }
}
