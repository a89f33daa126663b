//! Whole-document key/value persistence.
//!
//! [`DocumentStore`] is the only capability the interaction stores need from
//! persistence: read or replace one complete JSON document by key. There are
//! no partial updates and no document versioning.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{FeedError, Result};

/// Read/replace whole JSON documents by key.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns `None` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the document stored under `key`.
    async fn set(&self, key: &str, document: &Value) -> Result<()>;
}

/// The three document keys owned by the interaction and authoring stores.
#[derive(Debug, Clone)]
pub struct DocumentKeys {
    pub bookmarks: String,
    pub reactions: String,
    pub authored: String,
}

impl DocumentKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            bookmarks: format!("{prefix}_bookmarks"),
            reactions: format!("{prefix}_reactions"),
            authored: format!("{prefix}_authored_content"),
        }
    }
}

impl Default for DocumentKeys {
    fn default() -> Self {
        Self::with_prefix("@conceptfeed")
    }
}

/// SQLite-backed document store. Blocking calls run on the blocking pool.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

fn lock(conn: &Mutex<Connection>) -> std::sync::MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let conn = Arc::clone(&self.conn);
        let key = key.to_string();
        let body: Option<String> = tokio::task::spawn_blocking(move || {
            lock(&conn)
                .query_row(
                    "SELECT body FROM documents WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
        })
        .await??;

        body.map(|b| serde_json::from_str(&b).map_err(FeedError::from))
            .transpose()
    }

    async fn set(&self, key: &str, document: &Value) -> Result<()> {
        let body = serde_json::to_string(document)?;
        let conn = Arc::clone(&self.conn);
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let now = chrono::Utc::now().to_rfc3339();
            let size = body.len() as i64;
            lock(&conn).execute(
                "INSERT INTO documents (key, body, updated_at, size_bytes) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(key) DO UPDATE SET body = excluded.body, \
                 updated_at = excluded.updated_at, size_bytes = excluded.size_bytes",
                params![key, body, now, size],
            )
        })
        .await??;
        Ok(())
    }
}

/// In-process document store. Documents live only as long as the value.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: Mutex<HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let docs = self.docs.lock().unwrap_or_else(|p| p.into_inner());
        Ok(docs.get(key).cloned())
    }

    async fn set(&self, key: &str, document: &Value) -> Result<()> {
        let mut docs = self.docs.lock().unwrap_or_else(|p| p.into_inner());
        docs.insert(key.to_string(), document.clone());
        Ok(())
    }
}

/// One persisted document held in memory.
///
/// The in-memory value is the authoritative read path. Updates mutate it
/// first and then rewrite the whole document; writes through one cell are
/// serialized. A failed write is logged and not retried, and the in-memory
/// value keeps the update.
pub struct DocumentCell<T> {
    store: Arc<dyn DocumentStore>,
    key: String,
    value: Mutex<T>,
    writes: tokio::sync::Mutex<()>,
}

impl<T> DocumentCell<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Load the document under `key`. Missing or unreadable documents start
    /// from `T::default()`.
    pub async fn open(store: Arc<dyn DocumentStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let value = read_document(store.as_ref(), &key).await;
        Self {
            store,
            key,
            value: Mutex::new(value),
            writes: tokio::sync::Mutex::new(()),
        }
    }

    /// Run `f` against the current value.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.lock().unwrap_or_else(|p| p.into_inner()))
    }

    /// Mutate the value, then persist the whole document.
    pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let _write = self.writes.lock().await;
        let (out, document) = {
            let mut value = self.value.lock().unwrap_or_else(|p| p.into_inner());
            let out = f(&mut value);
            (out, serde_json::to_value(&*value))
        };

        let persisted = match document {
            Ok(doc) => self.store.set(&self.key, &doc).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = persisted {
            tracing::warn!(key = %self.key, error = %e, "failed to persist document");
        }
        out
    }

    /// Re-read the persisted document, replacing the in-memory value.
    pub async fn reload(&self) {
        let _write = self.writes.lock().await;
        let fresh = read_document(self.store.as_ref(), &self.key).await;
        *self.value.lock().unwrap_or_else(|p| p.into_inner()) = fresh;
    }
}

async fn read_document<T: DeserializeOwned + Default>(store: &dyn DocumentStore, key: &str) -> T {
    let loaded = match store.get(key).await {
        Ok(Some(doc)) => serde_json::from_value(doc).map_err(FeedError::from),
        Ok(None) => Ok(T::default()),
        Err(e) => Err(e),
    };
    loaded.unwrap_or_else(|e| {
        tracing::warn!(key = %key, error = %e, "failed to load document, starting empty");
        T::default()
    })
}
