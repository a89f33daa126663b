//! Cyclic, identity-stable feed sequencing.
//!
//! [`produce`] is a pure function of `(catalog, window)`: slot `i` holds
//! `catalog[i mod len]` with id `<canonical>-repeat-<i>`. [`InfiniteSequencer`]
//! only tracks the current window size.

use std::ops::Range;

use super::item::{FeedItem, FeedItemId};
use crate::config::SequencerConfig;
use crate::content::types::Concept;

/// The item at slot `index`, or `None` for an empty catalog.
pub fn item_at(catalog: &[Concept], index: usize) -> Option<FeedItem> {
    if catalog.is_empty() {
        return None;
    }
    let concept = &catalog[index % catalog.len()];
    Some(FeedItem {
        id: FeedItemId::new(concept.id.clone(), index),
        concept: concept.clone(),
    })
}

/// Materialize only the slots in `range`.
pub fn produce_range(catalog: &[Concept], range: Range<usize>) -> Vec<FeedItem> {
    if catalog.is_empty() {
        return Vec::new();
    }
    range.filter_map(|i| item_at(catalog, i)).collect()
}

/// The first `window` slots. Empty when the catalog is empty.
pub fn produce(catalog: &[Concept], window: usize) -> Vec<FeedItem> {
    produce_range(catalog, 0..window)
}

#[derive(Debug, Clone)]
pub struct InfiniteSequencer {
    window: usize,
    initial: usize,
    increment: usize,
    max_window: Option<usize>,
}

impl Default for InfiniteSequencer {
    fn default() -> Self {
        Self::new(&SequencerConfig::default())
    }
}

impl InfiniteSequencer {
    pub fn new(config: &SequencerConfig) -> Self {
        let max_window = config.window_cap();
        let initial = match max_window {
            Some(max) => config.initial_window.min(max),
            None => config.initial_window,
        };
        Self {
            window: initial,
            initial,
            increment: config.window_increment,
            max_window,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window
    }

    /// Grow the window by the configured increment, clamped to `max_window`
    /// when one is set. Returns the new size.
    pub fn on_boundary_reached(&mut self) -> usize {
        let grown = self.window.saturating_add(self.increment);
        self.window = match self.max_window {
            Some(max) => grown.min(max),
            None => grown,
        };
        tracing::debug!(window = self.window, "feed window grown");
        self.window
    }

    pub fn reset(&mut self) {
        self.window = self.initial;
    }

    /// The current window over `catalog`.
    pub fn produce(&self, catalog: &[Concept]) -> Vec<FeedItem> {
        produce(catalog, self.window)
    }
}
