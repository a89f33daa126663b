//! Single-choice reactions with per-kind tallies.
//!
//! Each concept has at most one active reaction. Switching reactions moves
//! one count from the old kind to the new one; tallies never go below zero.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::db::documents::{DocumentCell, DocumentStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    MindBlown,
    GotIt,
    Confused,
    LoveIt,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 4] = [
        ReactionKind::MindBlown,
        ReactionKind::GotIt,
        ReactionKind::Confused,
        ReactionKind::LoveIt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MindBlown => "mind_blown",
            Self::GotIt => "got_it",
            Self::Confused => "confused",
            Self::LoveIt => "love_it",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown reaction: {s}"))
    }
}

/// Tallies and the user's active reaction for one concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub tally: BTreeMap<ReactionKind, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<ReactionKind>,
}

impl Default for ReactionRecord {
    /// All kinds at zero, nothing active.
    fn default() -> Self {
        Self {
            tally: ReactionKind::ALL.into_iter().map(|k| (k, 0)).collect(),
            active: None,
        }
    }
}

impl ReactionRecord {
    pub fn count(&self, kind: ReactionKind) -> u32 {
        self.tally.get(&kind).copied().unwrap_or(0)
    }

    /// Move the active reaction to `kind`. Repeating the active kind leaves
    /// the tallies unchanged.
    pub fn apply(&mut self, kind: ReactionKind) {
        if let Some(prev) = self.active {
            let count = self.tally.entry(prev).or_insert(0);
            *count = count.saturating_sub(1);
        }
        *self.tally.entry(kind).or_insert(0) += 1;
        self.active = Some(kind);
    }
}

pub struct ReactionStore {
    doc: DocumentCell<HashMap<String, ReactionRecord>>,
}

impl ReactionStore {
    pub async fn open(store: Arc<dyn DocumentStore>, key: &str) -> Self {
        Self {
            doc: DocumentCell::open(store, key).await,
        }
    }

    /// Record `kind` as the active reaction on `id` and return the new record.
    pub async fn add_reaction(&self, id: &str, kind: ReactionKind) -> ReactionRecord {
        let record = self
            .doc
            .update(|map| {
                let record = map.entry(id.to_string()).or_default();
                record.apply(kind);
                record.clone()
            })
            .await;
        tracing::debug!(id, reaction = %kind, "reaction recorded");
        record
    }

    /// The stored record, or an all-zero record when there is none.
    pub fn get_reactions(&self, id: &str) -> ReactionRecord {
        self.doc.read(|map| map.get(id).cloned().unwrap_or_default())
    }

    pub fn active_reaction(&self, id: &str) -> Option<ReactionKind> {
        self.doc.read(|map| map.get(id).and_then(|r| r.active))
    }

    pub async fn reload(&self) {
        self.doc.reload().await;
    }
}
