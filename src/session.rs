//! Composition root for one user session.
//!
//! [`Session`] constructs the stores, loads the persisted documents and the
//! catalog, and exposes the operations a front end drives. Interaction
//! lookups always go through the canonical id, so every on-screen duplicate
//! of a concept sees the same bookmark, reaction and like state.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::SequencerConfig;
use crate::content::authored::AuthoredStore;
use crate::content::store::ContentStore;
use crate::content::types::{AuthoredConcept, Concept, ConceptDraft};
use crate::db::documents::{DocumentKeys, DocumentStore};
use crate::feed::random::RandomSelector;
use crate::feed::{canonical_id_of, FeedItem, InfiniteSequencer};
use crate::interactions::bookmarks::BookmarkStore;
use crate::interactions::likes::{LikeStore, LikeToggled};
use crate::interactions::reactions::{ReactionKind, ReactionRecord, ReactionStore};
use crate::remote::RemoteContentService;
use crate::resolver::{ConceptResolver, Resolution};

/// Everything a [`Session`] is built from.
pub struct SessionParts {
    pub remote: Arc<dyn RemoteContentService>,
    pub documents: Arc<dyn DocumentStore>,
    pub keys: DocumentKeys,
    pub sequencer: SequencerConfig,
    pub user_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub concepts: usize,
    pub bookmarks: usize,
    pub authored: usize,
}

pub struct Session {
    pub content: Arc<ContentStore>,
    pub authored: Arc<AuthoredStore>,
    pub bookmarks: BookmarkStore,
    pub reactions: ReactionStore,
    pub likes: LikeStore,
    pub resolver: ConceptResolver,
    pub random: RandomSelector,
    sequencer: Mutex<InfiniteSequencer>,
}

impl Session {
    /// Build every store without touching the network.
    pub async fn build(parts: SessionParts) -> Self {
        let SessionParts {
            remote,
            documents,
            keys,
            sequencer,
            user_id,
        } = parts;

        let content = Arc::new(ContentStore::new(Arc::clone(&remote)));
        let authored = Arc::new(AuthoredStore::open(Arc::clone(&documents), &keys.authored).await);
        let bookmarks = BookmarkStore::open(Arc::clone(&documents), &keys.bookmarks).await;
        let reactions = ReactionStore::open(Arc::clone(&documents), &keys.reactions).await;
        let likes = LikeStore::new(Arc::clone(&remote), user_id);
        let resolver =
            ConceptResolver::standard(remote, Arc::clone(&content), Arc::clone(&authored));

        Self {
            content,
            authored,
            bookmarks,
            reactions,
            likes,
            resolver,
            random: RandomSelector::new(),
            sequencer: Mutex::new(InfiniteSequencer::new(&sequencer)),
        }
    }

    /// Build the session and load the catalog.
    pub async fn open(parts: SessionParts) -> Self {
        let session = Self::build(parts).await;
        session.content.load().await;
        session
    }

    /// Reload the catalog, then drop like overlays.
    pub async fn refresh(&self) -> usize {
        let count = self.content.refresh().await;
        self.likes.reconcile();
        count
    }

    /// Re-read bookmarks, reactions and authored content from the document
    /// store, picking up writes made by another session over the same store.
    pub async fn reload_documents(&self) {
        tokio::join!(
            self.bookmarks.reload(),
            self.reactions.reload(),
            self.authored.reload()
        );
        tracing::debug!("interaction documents reloaded");
    }

    /// The current feed window.
    pub async fn feed(&self) -> Vec<FeedItem> {
        let catalog = self.content.concepts();
        self.sequencer.lock().await.produce(&catalog)
    }

    /// Grow the window after the renderer reached its end. Returns the new size.
    pub async fn load_more(&self) -> usize {
        self.sequencer.lock().await.on_boundary_reached()
    }

    pub async fn window_size(&self) -> usize {
        self.sequencer.lock().await.window_size()
    }

    pub async fn resolve(&self, feed_item_id: &str) -> Resolution {
        self.resolver.resolve(feed_item_id).await
    }

    pub async fn toggle_bookmark(&self, id: &str) -> bool {
        self.bookmarks.toggle(&canonical_id_of(id)).await
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.is_bookmarked(&canonical_id_of(id))
    }

    pub async fn react(&self, id: &str, kind: ReactionKind) -> ReactionRecord {
        self.reactions.add_reaction(&canonical_id_of(id), kind).await
    }

    pub fn reactions_for(&self, id: &str) -> ReactionRecord {
        self.reactions.get_reactions(&canonical_id_of(id))
    }

    pub fn toggle_like(&self, id: &str) -> LikeToggled {
        self.likes.toggle_like(&canonical_id_of(id))
    }

    /// Save a new authored concept and put it in the catalog.
    pub async fn author(&self, draft: ConceptDraft) -> AuthoredConcept {
        let authored = self.authored.add(draft).await;
        self.content.add_local(authored.to_concept());
        authored
    }

    /// Delete an authored concept from storage and from the catalog.
    pub async fn remove_authored(&self, id: &str) -> bool {
        let removed = self.authored.remove(id).await;
        if removed {
            self.content.remove_local(id);
        }
        removed
    }

    /// Bookmarked concepts found in the catalog, then those found only in
    /// authored content. Bookmarks whose concept is gone are skipped.
    pub fn saved_concepts(&self) -> Vec<Concept> {
        let catalog = self.content.concepts();
        let bookmarked = |c: &&Concept| self.bookmarks.is_bookmarked(&c.id);

        let mut saved: Vec<Concept> = catalog.iter().filter(bookmarked).cloned().collect();
        for authored in self.authored.list() {
            let concept = authored.to_concept();
            if self.bookmarks.is_bookmarked(&concept.id) && !saved.iter().any(|c| c.id == concept.id)
            {
                saved.push(concept);
            }
        }
        saved
    }

    pub fn random(&self) -> Option<Concept> {
        self.random.get_random(&self.content.concepts())
    }

    pub fn daily(&self) -> Option<Concept> {
        self.random.get_daily(&self.content.concepts())
    }

    pub fn profile_stats(&self) -> ProfileStats {
        ProfileStats {
            concepts: self.content.len(),
            bookmarks: self.bookmarks.len(),
            authored: self.authored.len(),
        }
    }
}
