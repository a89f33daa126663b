//! Remote content service.
//!
//! Provides the [`RemoteContentService`] trait and an HTTP implementation,
//! [`http::HttpContentService`], created from configuration.

pub mod http;

use async_trait::async_trait;

use crate::content::types::ApiConcept;
use crate::error::Result;

/// Network-side operations the engine consumes. Any failure is a
/// network-class [`FeedError`](crate::error::FeedError).
#[async_trait]
pub trait RemoteContentService: Send + Sync {
    /// Fetch the full catalog.
    async fn fetch_all(&self) -> Result<Vec<ApiConcept>>;

    /// Fetch one concept by canonical id.
    async fn fetch_by_id(&self, id: &str) -> Result<ApiConcept>;

    /// Toggle the like of `user_id` on `concept_id`. Returns the server's `liked` flag.
    async fn toggle_like(&self, user_id: u64, concept_id: &str) -> Result<bool>;

    /// Server-side like counter for one concept.
    async fn like_count(&self, concept_id: &str) -> Result<u64>;

    /// Cheap reachability probe.
    async fn health(&self) -> Result<()>;
}
