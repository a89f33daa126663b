#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use conceptfeed::config::SequencerConfig;
use conceptfeed::content::types::{ApiConcept, ConceptDraft, Level};
use conceptfeed::db::documents::{DocumentKeys, DocumentStore, MemoryDocumentStore};
use conceptfeed::error::{FeedError, Result};
use conceptfeed::remote::RemoteContentService;
use conceptfeed::session::{Session, SessionParts};

/// Build a remote-shaped concept with the given id and difficulty.
pub fn api_concept(id: &str, difficulty_level: u8) -> ApiConcept {
    ApiConcept {
        id: id.to_string(),
        title: format!("Title {id}"),
        description: format!("About {id}"),
        short_code: format!("// {id}"),
        full_explanation: format!("Everything about {id}"),
        full_code: format!("fn {id}() {{}}"),
        category: "react-native".to_string(),
        difficulty_level,
    }
}

pub fn draft(title: &str, level: Level) -> ConceptDraft {
    ConceptDraft {
        title: title.to_string(),
        desc: format!("{title} in one line"),
        short_code: "let x = 1;".to_string(),
        full_explanation: format!("{title} explained"),
        full_code: "let x = 1;\nprintln!(\"{x}\");".to_string(),
        level,
    }
}

/// In-process stand-in for the content API.
///
/// `fetch_all` answers from a queue of scripted catalogs (each with an
/// optional delay) and falls back to `catalog` once the queue is drained.
#[derive(Default)]
pub struct FakeRemote {
    pub catalog: Mutex<Vec<ApiConcept>>,
    pub scripted: Mutex<VecDeque<(Duration, Vec<ApiConcept>)>>,
    pub offline: AtomicBool,
    pub fetch_all_calls: AtomicUsize,
    pub fetch_by_id_calls: AtomicUsize,
    pub like_toggles: Mutex<Vec<(u64, String)>>,
    pub like_count: AtomicUsize,
}

impl FakeRemote {
    pub fn with_catalog(concepts: Vec<ApiConcept>) -> Arc<Self> {
        Arc::new(Self {
            catalog: Mutex::new(concepts),
            ..Default::default()
        })
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn script(&self, delay: Duration, concepts: Vec<ApiConcept>) {
        self.scripted.lock().unwrap().push_back((delay, concepts));
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(FeedError::Unavailable("fake remote offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteContentService for FakeRemote {
    async fn fetch_all(&self) -> Result<Vec<ApiConcept>> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let next = self.scripted.lock().unwrap().pop_front();
        match next {
            Some((delay, concepts)) => {
                tokio::time::sleep(delay).await;
                Ok(concepts)
            }
            None => Ok(self.catalog.lock().unwrap().clone()),
        }
    }

    async fn fetch_by_id(&self, id: &str) -> Result<ApiConcept> {
        self.fetch_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.catalog
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| FeedError::Status {
                status: 404,
                url: format!("fake://concepts/{id}"),
            })
    }

    async fn toggle_like(&self, user_id: u64, concept_id: &str) -> Result<bool> {
        self.check_online()?;
        let mut toggles = self.like_toggles.lock().unwrap();
        toggles.push((user_id, concept_id.to_string()));
        let count = toggles.iter().filter(|(_, id)| id == concept_id).count();
        Ok(count % 2 == 1)
    }

    async fn like_count(&self, _concept_id: &str) -> Result<u64> {
        self.check_online()?;
        Ok(self.like_count.load(Ordering::SeqCst) as u64)
    }

    async fn health(&self) -> Result<()> {
        self.check_online()
    }
}

/// Open a session over `remote` with an in-memory document store.
pub async fn session_with(remote: Arc<FakeRemote>) -> (Session, Arc<dyn DocumentStore>) {
    let documents: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let session = session_over(remote, Arc::clone(&documents)).await;
    (session, documents)
}

/// Open a session over `remote` and an existing document store.
pub async fn session_over(remote: Arc<FakeRemote>, documents: Arc<dyn DocumentStore>) -> Session {
    Session::open(SessionParts {
        remote,
        documents,
        keys: DocumentKeys::with_prefix("@test"),
        sequencer: SequencerConfig::default(),
        user_id: 7,
    })
    .await
}
