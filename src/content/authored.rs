//! User-authored concepts, persisted as one document (newest first).

use std::sync::Arc;

use super::types::{AuthoredConcept, Concept, ConceptDraft};
use crate::db::documents::{DocumentCell, DocumentStore};

pub struct AuthoredStore {
    doc: DocumentCell<Vec<AuthoredConcept>>,
}

impl AuthoredStore {
    pub async fn open(store: Arc<dyn DocumentStore>, key: &str) -> Self {
        let doc: DocumentCell<Vec<AuthoredConcept>> = DocumentCell::open(store, key).await;
        tracing::debug!(key, count = doc.read(|v| v.len()), "authored content loaded");
        Self { doc }
    }

    /// Persist a new concept at the head of the list and return it.
    pub async fn add(&self, draft: ConceptDraft) -> AuthoredConcept {
        let authored = AuthoredConcept::from_draft(draft);
        let stored = authored.clone();
        self.doc.update(move |list| list.insert(0, stored)).await;
        tracing::info!(id = %authored.id, "authored concept saved");
        authored
    }

    /// Remove by id. Returns `false` when no such concept exists.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self
            .doc
            .update(|list| {
                let before = list.len();
                list.retain(|c| c.id != id);
                list.len() != before
            })
            .await;
        if removed {
            tracing::info!(id, "authored concept removed");
        }
        removed
    }

    pub fn list(&self) -> Vec<AuthoredConcept> {
        self.doc.read(|list| list.clone())
    }

    /// Linear search, adapted to the canonical shape.
    pub fn find(&self, id: &str) -> Option<Concept> {
        self.doc
            .read(|list| list.iter().find(|c| c.id == id).map(AuthoredConcept::to_concept))
    }

    pub fn len(&self) -> usize {
        self.doc.read(|list| list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn reload(&self) {
        self.doc.reload().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::Level;
    use crate::db::documents::MemoryDocumentStore;

    fn draft(title: &str) -> ConceptDraft {
        ConceptDraft {
            title: title.into(),
            desc: format!("{title} desc"),
            short_code: "code".into(),
            full_explanation: "explanation".into(),
            full_code: "full code".into(),
            level: Level::Basic,
        }
    }

    #[tokio::test]
    async fn newest_first_and_persisted() {
        let docs: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let store = AuthoredStore::open(Arc::clone(&docs), "authored").await;
        let first = store.add(draft("one")).await;
        let second = store.add(draft("two")).await;

        let ids: Vec<String> = store.list().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

        let reopened = AuthoredStore::open(docs, "authored").await;
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.find(&first.id).map(|c| c.title), Some("one".into()));
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_changed() {
        let store = AuthoredStore::open(Arc::new(MemoryDocumentStore::new()), "authored").await;
        let added = store.add(draft("one")).await;
        assert!(!store.remove("my-missing").await);
        assert!(store.remove(&added.id).await);
        assert!(store.is_empty());
    }
}
