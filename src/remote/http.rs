//! HTTP client for the content API.
//!
//! Every list/detail endpoint wraps its payload in a `{ "success", "data" }`
//! envelope; non-success statuses and envelopes without data map to
//! network-class errors. Ids are appended as single percent-encoded path
//! segments, so an id can never address a different resource.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::RemoteContentService;
use crate::config::RemoteConfig;
use crate::content::types::ApiConcept;
use crate::error::{FeedError, Result};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct LikeRequest<'a> {
    user_id: u64,
    concept_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct LikeResponse {
    liked: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeCountResponse {
    likes_count: u64,
}

pub struct HttpContentService {
    client: Client,
    base_url: Url,
    health_url: Url,
}

impl HttpContentService {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = parse_url(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(FeedError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "not a hierarchical URL".into(),
            });
        }
        Ok(Self {
            client,
            base_url,
            health_url: parse_url(&config.health_url)?,
        })
    }

    /// `base_url` extended by `segments`, each encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self.client.get(url.clone()).send().await?;
        let response = ensure_success(response, url)?;
        Ok(response.json::<T>().await?)
    }

    async fn get_data<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let envelope: Envelope<T> = self.get_json(url).await?;
        match envelope.data {
            Some(data) => Ok(data),
            None => Err(FeedError::Unavailable(
                envelope
                    .error
                    .unwrap_or_else(|| format!("response from {url} carried no data")),
            )),
        }
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| FeedError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn ensure_success(response: Response, url: &Url) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FeedError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl RemoteContentService for HttpContentService {
    async fn fetch_all(&self) -> Result<Vec<ApiConcept>> {
        let url = self.endpoint(&["concepts"]);
        let concepts: Vec<ApiConcept> = self.get_data(&url).await?;
        tracing::debug!(count = concepts.len(), "fetched catalog");
        Ok(concepts)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<ApiConcept> {
        let url = self.endpoint(&["concepts", id]);
        self.get_data(&url).await
    }

    async fn toggle_like(&self, user_id: u64, concept_id: &str) -> Result<bool> {
        let url = self.endpoint(&["likes"]);
        let response = self
            .client
            .post(url.clone())
            .json(&LikeRequest { user_id, concept_id })
            .send()
            .await?;
        let body: LikeResponse = ensure_success(response, &url)?.json().await?;
        Ok(body.liked)
    }

    async fn like_count(&self, concept_id: &str) -> Result<u64> {
        let url = self.endpoint(&["likes", "concept", concept_id]);
        let body: LikeCountResponse = self.get_json(&url).await?;
        Ok(body.likes_count)
    }

    async fn health(&self) -> Result<()> {
        let response = self.client.get(self.health_url.clone()).send().await?;
        ensure_success(response, &self.health_url)?;
        Ok(())
    }
}
