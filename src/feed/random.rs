//! Random and daily concept selection.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::content::types::Concept;

/// Render a date the way the daily seed expects it, e.g. `"Sat Oct 17 2026"`.
pub fn date_seed_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Sum of the character codes of the date string.
pub fn date_seed(date: NaiveDate) -> u64 {
    date_seed_string(date).chars().map(|c| c as u64).sum()
}

/// Same concept for every call on the same date.
pub fn daily_for(catalog: &[Concept], date: NaiveDate) -> Option<&Concept> {
    if catalog.is_empty() {
        return None;
    }
    let index = (date_seed(date) % catalog.len() as u64) as usize;
    catalog.get(index)
}

pub struct RandomSelector {
    rng: Mutex<StdRng>,
    last: Mutex<Option<String>>,
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSelector {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            last: Mutex::new(None),
        }
    }

    /// Uniform pick that never repeats the previous pick unless the catalog
    /// has a single entry. The last pick lives in memory only.
    pub fn get_random(&self, catalog: &[Concept]) -> Option<Concept> {
        if catalog.is_empty() {
            return None;
        }
        let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());

        let mut candidates: Vec<&Concept> = catalog
            .iter()
            .filter(|c| last.as_deref() != Some(c.id.as_str()))
            .collect();
        if candidates.is_empty() {
            candidates = catalog.iter().collect();
        }

        let index = self
            .rng
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .gen_range(0..candidates.len());
        let picked = candidates[index].clone();
        *last = Some(picked.id.clone());
        Some(picked)
    }

    /// The concept of the day for the device-local calendar date.
    pub fn get_daily(&self, catalog: &[Concept]) -> Option<Concept> {
        daily_for(catalog, chrono::Local::now().date_naive()).cloned()
    }

    pub fn last_pick(&self) -> Option<String> {
        self.last.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ids: &[&str]) -> Vec<Concept> {
        ids.iter()
            .map(|id| Concept {
                id: id.to_string(),
                title: id.to_string(),
                description: String::new(),
                short_code: String::new(),
                full_explanation: String::new(),
                full_code: String::new(),
                category: "test".into(),
                difficulty_level: 1,
            })
            .collect()
    }

    #[test]
    fn date_string_matches_expected_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(date_seed_string(date), "Sat Oct 17 2026");
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(date_seed_string(jan), "Wed Jan 01 2025");
    }

    #[test]
    fn daily_is_stable_for_a_date() {
        let cat = catalog(&["a", "b", "c", "d", "e"]);
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let first = daily_for(&cat, date).unwrap().id.clone();
        for _ in 0..10 {
            assert_eq!(daily_for(&cat, date).unwrap().id, first);
        }
        let expected = (date_seed(date) % 5) as usize;
        assert_eq!(first, cat[expected].id);
    }

    #[test]
    fn get_daily_repeats_within_a_call_burst() {
        let cat = catalog(&["a", "b", "c"]);
        let selector = RandomSelector::with_seed(1);
        let first = selector.get_daily(&cat).unwrap().id;
        assert_eq!(selector.get_daily(&cat).unwrap().id, first);
    }

    #[test]
    fn random_never_repeats_consecutively() {
        let cat = catalog(&["a", "b"]);
        let selector = RandomSelector::with_seed(7);
        let mut previous = selector.get_random(&cat).unwrap().id;
        for _ in 0..200 {
            let next = selector.get_random(&cat).unwrap().id;
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn single_entry_catalog_repeats() {
        let cat = catalog(&["only"]);
        let selector = RandomSelector::with_seed(3);
        assert_eq!(selector.get_random(&cat).unwrap().id, "only");
        assert_eq!(selector.get_random(&cat).unwrap().id, "only");
        assert_eq!(selector.last_pick().as_deref(), Some("only"));
    }

    #[test]
    fn empty_catalog_yields_none() {
        let selector = RandomSelector::new();
        assert!(selector.get_random(&[]).is_none());
        assert!(selector.get_daily(&[]).is_none());
    }
}
