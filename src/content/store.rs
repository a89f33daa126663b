//! The canonical catalog.
//!
//! [`ContentStore`] exclusively owns the in-memory catalog. It is loaded from
//! the remote service, kept stable-sorted by difficulty, and published to
//! subscribers through a `tokio::sync::watch` channel.

use std::sync::Arc;
use tokio::sync::watch;

use super::types::Concept;
use crate::remote::RemoteContentService;

/// One published state of the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub concepts: Arc<Vec<Concept>>,
    pub loading: bool,
}

pub struct ContentStore {
    remote: Arc<dyn RemoteContentService>,
    catalog: watch::Sender<CatalogSnapshot>,
}

/// Stable sort ascending by difficulty; equal levels keep their relative order.
pub fn sort_by_difficulty(concepts: &mut [Concept]) {
    concepts.sort_by_key(|c| c.difficulty_level);
}

impl ContentStore {
    /// Create an empty store. Nothing is fetched until [`load`](Self::load).
    pub fn new(remote: Arc<dyn RemoteContentService>) -> Self {
        let (catalog, _) = watch::channel(CatalogSnapshot::default());
        Self { remote, catalog }
    }

    /// Fetch the full catalog and replace the in-memory one.
    ///
    /// On failure the catalog becomes empty and the error is logged; there is
    /// no retry. Concurrent loads are not coalesced: whichever finishes last
    /// wins. Returns the number of concepts now in the catalog.
    pub async fn load(&self) -> usize {
        self.catalog.send_modify(|snap| snap.loading = true);

        let concepts = match self.remote.fetch_all().await {
            Ok(api_concepts) => {
                let mut concepts: Vec<Concept> =
                    api_concepts.into_iter().map(Concept::from).collect();
                sort_by_difficulty(&mut concepts);
                tracing::info!(count = concepts.len(), "catalog loaded");
                concepts
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load catalog");
                Vec::new()
            }
        };

        let count = concepts.len();
        self.catalog.send_replace(CatalogSnapshot {
            concepts: Arc::new(concepts),
            loading: false,
        });
        count
    }

    /// Re-run [`load`](Self::load).
    pub async fn refresh(&self) -> usize {
        self.load().await
    }

    /// Insert a user-authored concept at the head of the catalog, then re-sort.
    pub fn add_local(&self, concept: Concept) {
        tracing::debug!(id = %concept.id, "adding local concept to catalog");
        self.catalog.send_modify(|snap| {
            let mut concepts = Vec::with_capacity(snap.concepts.len() + 1);
            concepts.push(concept);
            concepts.extend(snap.concepts.iter().cloned());
            sort_by_difficulty(&mut concepts);
            snap.concepts = Arc::new(concepts);
        });
    }

    /// Drop a concept from the in-memory catalog. Returns whether it was present.
    pub fn remove_local(&self, id: &str) -> bool {
        self.catalog.send_if_modified(|snap| {
            if !snap.concepts.iter().any(|c| c.id == id) {
                return false;
            }
            let kept: Vec<Concept> = snap.concepts.iter().filter(|c| c.id != id).cloned().collect();
            snap.concepts = Arc::new(kept);
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.catalog.subscribe()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.catalog.borrow().clone()
    }

    /// The current catalog, in display order.
    pub fn concepts(&self) -> Arc<Vec<Concept>> {
        Arc::clone(&self.catalog.borrow().concepts)
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.borrow().loading
    }

    /// Linear search of the in-memory catalog.
    pub fn find(&self, id: &str) -> Option<Concept> {
        self.catalog
            .borrow()
            .concepts
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.catalog.borrow().concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
