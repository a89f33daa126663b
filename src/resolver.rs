//! Feed-item id → canonical concept resolution.
//!
//! A [`ConceptResolver`] holds an ordered list of [`ResolveTier`]s. The id is
//! normalized to its canonical form once, then each tier is asked in turn;
//! the first tier returning a concept wins. A tier that misses (or fails)
//! returns `None` and the next tier is tried. When every tier misses the
//! result is [`Resolution::NotFound`], which is terminal.
//!
//! The default chain is remote → in-memory catalog → authored content.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::content::authored::AuthoredStore;
use crate::content::store::ContentStore;
use crate::content::types::Concept;
use crate::error::{FeedError, Result};
use crate::feed::canonical_id_of;
use crate::remote::RemoteContentService;

/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Remote,
    Catalog,
    Authored,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Catalog => "catalog",
            Self::Authored => "authored",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { concept: Concept, source: Source },
    NotFound { canonical_id: String },
}

impl Resolution {
    pub fn concept(&self) -> Option<&Concept> {
        match self {
            Self::Found { concept, .. } => Some(concept),
            Self::NotFound { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<(Concept, Source)> {
        match self {
            Self::Found { concept, source } => Ok((concept, source)),
            Self::NotFound { canonical_id } => Err(FeedError::NotFound(canonical_id)),
        }
    }
}

/// One step of the resolution chain. `None` means "not here, try next".
#[async_trait]
pub trait ResolveTier: Send + Sync {
    fn source(&self) -> Source;

    async fn lookup(&self, canonical_id: &str) -> Option<Concept>;
}

/// Authoritative when reachable. Every error falls through.
pub struct RemoteTier {
    remote: Arc<dyn RemoteContentService>,
}

impl RemoteTier {
    pub fn new(remote: Arc<dyn RemoteContentService>) -> Self {
        Self { remote }
    }
}

#[async_trait]
impl ResolveTier for RemoteTier {
    fn source(&self) -> Source {
        Source::Remote
    }

    async fn lookup(&self, canonical_id: &str) -> Option<Concept> {
        match self.remote.fetch_by_id(canonical_id).await {
            Ok(api) if api.id == canonical_id => Some(Concept::from(api)),
            Ok(api) => {
                tracing::warn!(id = canonical_id, returned = %api.id, "remote returned a different concept");
                None
            }
            Err(e) => {
                tracing::debug!(id = canonical_id, error = %e, "remote tier missed");
                None
            }
        }
    }
}

/// Content already loaded this session.
pub struct CatalogTier {
    content: Arc<ContentStore>,
}

impl CatalogTier {
    pub fn new(content: Arc<ContentStore>) -> Self {
        Self { content }
    }
}

#[async_trait]
impl ResolveTier for CatalogTier {
    fn source(&self) -> Source {
        Source::Catalog
    }

    async fn lookup(&self, canonical_id: &str) -> Option<Concept> {
        self.content.find(canonical_id)
    }
}

/// Content created on this device, available offline.
pub struct AuthoredTier {
    authored: Arc<AuthoredStore>,
}

impl AuthoredTier {
    pub fn new(authored: Arc<AuthoredStore>) -> Self {
        Self { authored }
    }
}

#[async_trait]
impl ResolveTier for AuthoredTier {
    fn source(&self) -> Source {
        Source::Authored
    }

    async fn lookup(&self, canonical_id: &str) -> Option<Concept> {
        self.authored.find(canonical_id)
    }
}

pub struct ConceptResolver {
    tiers: Vec<Box<dyn ResolveTier>>,
}

impl ConceptResolver {
    /// Build a resolver from tiers in the order they should be tried.
    pub fn new(tiers: Vec<Box<dyn ResolveTier>>) -> Self {
        Self { tiers }
    }

    /// The standard remote → catalog → authored chain.
    pub fn standard(
        remote: Arc<dyn RemoteContentService>,
        content: Arc<ContentStore>,
        authored: Arc<AuthoredStore>,
    ) -> Self {
        Self::new(vec![
            Box::new(RemoteTier::new(remote)),
            Box::new(CatalogTier::new(content)),
            Box::new(AuthoredTier::new(authored)),
        ])
    }

    /// Resolve a feed-item id (or a plain canonical id). Stateless between calls.
    pub async fn resolve(&self, id: &str) -> Resolution {
        let canonical_id = canonical_id_of(id);

        for tier in &self.tiers {
            if let Some(concept) = tier.lookup(&canonical_id).await {
                tracing::debug!(id, canonical = %canonical_id, source = %tier.source(), "resolved");
                return Resolution::Found {
                    concept,
                    source: tier.source(),
                };
            }
        }

        tracing::info!(id, canonical = %canonical_id, "concept not found in any tier");
        Resolution::NotFound { canonical_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::ApiConcept;

    struct Scripted {
        source: Source,
        hit: Option<&'static str>,
    }

    #[async_trait]
    impl ResolveTier for Scripted {
        fn source(&self) -> Source {
            self.source
        }

        async fn lookup(&self, canonical_id: &str) -> Option<Concept> {
            (self.hit == Some(canonical_id)).then(|| Concept {
                id: canonical_id.to_string(),
                title: self.source.to_string(),
                description: String::new(),
                short_code: String::new(),
                full_explanation: String::new(),
                full_code: String::new(),
                category: "test".into(),
                difficulty_level: 1,
            })
        }
    }

    fn tier(source: Source, hit: Option<&'static str>) -> Box<dyn ResolveTier> {
        Box::new(Scripted { source, hit })
    }

    #[tokio::test]
    async fn first_matching_tier_wins() {
        let resolver = ConceptResolver::new(vec![
            tier(Source::Remote, None),
            tier(Source::Catalog, Some("x")),
            tier(Source::Authored, Some("x")),
        ]);
        let resolution = resolver.resolve("x-repeat-2").await;
        let (concept, source) = resolution.into_result().unwrap();
        assert_eq!(concept.id, "x");
        assert_eq!(source, Source::Catalog);
    }

    #[tokio::test]
    async fn exhausting_tiers_is_not_found() {
        let resolver = ConceptResolver::new(vec![
            tier(Source::Remote, None),
            tier(Source::Catalog, Some("y")),
        ]);
        assert_eq!(
            resolver.resolve("x-repeat-9").await,
            Resolution::NotFound {
                canonical_id: "x".into()
            }
        );
        let err = resolver.resolve("x").await.into_result().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }

    /// Answers every lookup with the same record, whatever id was asked for.
    struct AlwaysX;

    #[async_trait]
    impl RemoteContentService for AlwaysX {
        async fn fetch_all(&self) -> crate::error::Result<Vec<ApiConcept>> {
            Ok(Vec::new())
        }
        async fn fetch_by_id(&self, _id: &str) -> crate::error::Result<ApiConcept> {
            Ok(ApiConcept {
                id: "x".into(),
                title: "X".into(),
                description: String::new(),
                short_code: String::new(),
                full_explanation: String::new(),
                full_code: String::new(),
                category: "test".into(),
                difficulty_level: 1,
            })
        }
        async fn toggle_like(&self, _: u64, _: &str) -> crate::error::Result<bool> {
            Ok(false)
        }
        async fn like_count(&self, _: &str) -> crate::error::Result<u64> {
            Ok(0)
        }
        async fn health(&self) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn remote_record_with_other_id_is_a_miss() {
        let resolver = ConceptResolver::new(vec![
            Box::new(RemoteTier::new(Arc::new(AlwaysX))),
            tier(Source::Catalog, Some("y")),
        ]);

        let (concept, source) = resolver.resolve("y-repeat-1").await.into_result().unwrap();
        assert_eq!(concept.id, "y");
        assert_eq!(source, Source::Catalog);

        let (_, source) = resolver.resolve("x").await.into_result().unwrap();
        assert_eq!(source, Source::Remote);
    }

    #[tokio::test]
    async fn empty_chain_finds_nothing() {
        let resolver = ConceptResolver::new(Vec::new());
        assert!(resolver.resolve("x").await.concept().is_none());
    }
}
