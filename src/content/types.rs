//! Concept type definitions.
//!
//! [`Concept`] is the canonical record every other component works with.
//! [`ApiConcept`] is the remote wire shape and [`AuthoredConcept`] the
//! persisted shape of user-authored content; both adapt into [`Concept`].

use serde::{Deserialize, Serialize};

/// Prefix of every locally-authored concept id. Remote ids never use it.
pub const AUTHORED_ID_PREFIX: &str = "my-";

/// Category assigned to locally-authored concepts.
pub const AUTHORED_CATEGORY: &str = "my-content";

/// A canonical content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Unique within the canonical namespace.
    pub id: String,
    pub title: String,
    pub description: String,
    pub short_code: String,
    pub full_explanation: String,
    pub full_code: String,
    pub category: String,
    /// Small positive ordinal, 1 = basic.
    pub difficulty_level: u8,
}

impl Concept {
    pub fn level(&self) -> Level {
        Level::from_difficulty(self.difficulty_level)
    }

    pub fn is_authored(&self) -> bool {
        self.id.starts_with(AUTHORED_ID_PREFIX)
    }
}

/// A concept as returned by the remote content service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConcept {
    pub id: String,
    pub title: String,
    pub description: String,
    pub short_code: String,
    pub full_explanation: String,
    pub full_code: String,
    pub category: String,
    pub difficulty_level: u8,
}

impl From<ApiConcept> for Concept {
    fn from(api: ApiConcept) -> Self {
        Self {
            id: api.id,
            title: api.title,
            description: api.description,
            short_code: api.short_code,
            full_explanation: api.full_explanation,
            full_code: api.full_code,
            category: api.category,
            difficulty_level: api.difficulty_level,
        }
    }
}

/// Difficulty bucket shown to authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Basic,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn difficulty(&self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    /// 1 is basic, 2 intermediate, anything else advanced.
    pub fn from_difficulty(level: u8) -> Self {
        match level {
            0 | 1 => Self::Basic,
            2 => Self::Intermediate,
            _ => Self::Advanced,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!("unknown level: {s}")),
        }
    }
}

/// Fields a user fills in when authoring a concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptDraft {
    pub title: String,
    pub desc: String,
    pub short_code: String,
    pub full_explanation: String,
    pub full_code: String,
    pub level: Level,
}

/// A user-authored concept as persisted in the authored-content document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredConcept {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub short_code: String,
    pub full_explanation: String,
    pub full_code: String,
    pub level: Level,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl AuthoredConcept {
    /// Assign a fresh id from the authored namespace.
    pub fn from_draft(draft: ConceptDraft) -> Self {
        Self {
            id: format!("{AUTHORED_ID_PREFIX}{}", uuid::Uuid::now_v7()),
            title: draft.title,
            desc: draft.desc,
            short_code: draft.short_code,
            full_explanation: draft.full_explanation,
            full_code: draft.full_code,
            level: draft.level,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_concept(&self) -> Concept {
        Concept {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.desc.clone(),
            short_code: self.short_code.clone(),
            full_explanation: self.full_explanation.clone(),
            full_code: self.full_code.clone(),
            category: AUTHORED_CATEGORY.to_string(),
            difficulty_level: self.level.difficulty(),
        }
    }
}
