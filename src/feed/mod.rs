//! Feed generation: slot identity, cyclic sequencing, random/daily picks.

pub mod item;
pub mod random;
pub mod sequencer;

pub use item::{canonical_id_of, FeedItem, FeedItemId};
pub use sequencer::InfiniteSequencer;
