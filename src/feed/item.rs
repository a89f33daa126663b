//! Feed-item identity.
//!
//! A feed item is one rendering slot: a canonical concept placed at a
//! sequence index. Its string form is `<canonical id>-repeat-<index>`.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::content::types::Concept;

pub const REPEAT_SEPARATOR: &str = "-repeat-";

/// Structured feed-item id. Encoding is a pure function of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedItemId {
    pub canonical_id: String,
    pub index: usize,
}

impl FeedItemId {
    pub fn new(canonical_id: impl Into<String>, index: usize) -> Self {
        Self {
            canonical_id: canonical_id.into(),
            index,
        }
    }

    pub fn encode(&self) -> String {
        format!("{}{REPEAT_SEPARATOR}{}", self.canonical_id, self.index)
    }

    /// Parse an encoded id. The separator is matched from the right and the
    /// suffix must be a decimal index, so canonical ids that themselves
    /// contain the separator still decode. Returns `None` for plain ids.
    pub fn decode(encoded: &str) -> Option<Self> {
        let (canonical, index) = encoded.rsplit_once(REPEAT_SEPARATOR)?;
        if canonical.is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::new(canonical, index.parse().ok()?))
    }
}

/// The canonical id behind any identifier: feed-item ids are decoded,
/// anything else is taken as already canonical.
pub fn canonical_id_of(id: &str) -> String {
    match FeedItemId::decode(id) {
        Some(item) => item.canonical_id,
        None => id.to_string(),
    }
}

impl fmt::Display for FeedItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{REPEAT_SEPARATOR}{}", self.canonical_id, self.index)
    }
}

impl Serialize for FeedItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One slot of the virtualized feed. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub id: FeedItemId,
    pub concept: Concept,
}

impl FeedItem {
    pub fn canonical_id(&self) -> &str {
        &self.id.canonical_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_deterministic() {
        assert_eq!(FeedItemId::new("x", 7).encode(), "x-repeat-7");
        assert_eq!(FeedItemId::new("x", 7).encode(), FeedItemId::new("x", 7).to_string());
    }

    #[test]
    fn different_slots_share_canonical_id() {
        assert_eq!(canonical_id_of("x-repeat-0"), "x");
        assert_eq!(canonical_id_of("x-repeat-7"), "x");
    }

    #[test]
    fn plain_ids_pass_through() {
        assert_eq!(canonical_id_of("hooks"), "hooks");
        assert_eq!(canonical_id_of("x-repeat-"), "x-repeat-");
        assert_eq!(canonical_id_of("x-repeat-abc"), "x-repeat-abc");
        assert!(FeedItemId::decode("-repeat-3").is_none());
    }

    #[test]
    fn separator_inside_canonical_id_survives() {
        let id = FeedItemId::new("a-repeat-b", 3);
        assert_eq!(FeedItemId::decode(&id.encode()), Some(id));
    }

    #[test]
    fn serializes_as_encoded_string() {
        let json = serde_json::to_value(FeedItemId::new("hooks", 2)).unwrap();
        assert_eq!(json, serde_json::json!("hooks-repeat-2"));
    }
}
