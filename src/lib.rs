//! Concept feed engine: short educational entries served through an endless,
//! swipeable feed.
//!
//! The crate merges remotely-fetched and locally-authored concepts into one
//! canonical catalog, turns that finite catalog into a cyclic feed whose slots
//! have stable identities, resolves a slot id back to its concept through an
//! ordered fallback chain, and keeps per-user interaction state keyed by
//! canonical id.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`content::store::ContentStore`] | Canonical catalog, stable-sorted by difficulty |
//! | [`content::authored::AuthoredStore`] | User-authored concepts, persisted |
//! | [`feed::InfiniteSequencer`] | Growable cyclic window over the catalog |
//! | [`resolver::ConceptResolver`] | Remote → catalog → authored lookup chain |
//! | [`interactions`] | Bookmarks, reactions, optimistic likes |
//! | [`feed::random::RandomSelector`] | Random and date-deterministic picks |
//! | [`session::Session`] | Wires the above together for one user |
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite document storage, schema and migrations
//! - [`error`]: Network / not-found / storage error taxonomy
//! - [`remote`]: Remote content service trait and HTTP client

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod feed;
pub mod interactions;
pub mod remote;
pub mod resolver;
pub mod session;
