//! Per-user interaction state keyed by canonical concept id.
//!
//! Three independent stores: [`bookmarks::BookmarkStore`],
//! [`reactions::ReactionStore`] and [`likes::LikeStore`]. The first two
//! persist one whole document each; likes are an in-memory overlay on the
//! server counter. There is no cross-store transaction.

pub mod bookmarks;
pub mod likes;
pub mod reactions;
