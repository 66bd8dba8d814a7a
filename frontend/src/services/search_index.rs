//! In-memory fuzzy index over product display names.
//!
//! The index is a pure function of the current product list: it is rebuilt
//! wholesale whenever the list changes and never updated incrementally. A
//! query ranks exact substring hits first, then typo-tolerant matches scored
//! by Jaro-Winkler similarity against the whole name and its tokens, gated
//! by a fixed threshold tuned for minor misspellings.

use std::cmp::Ordering;
use std::rc::Rc;

use common::model::product::Product;
use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a non-substring match to qualify.
const MIN_SIMILARITY: f64 = 0.78;

/// Score assigned to exact substring hits; always outranks fuzzy scores,
/// which live in `[MIN_SIMILARITY, 1.0]`.
const SUBSTRING_SCORE: f64 = 2.0;

#[derive(Default)]
pub struct SearchIndex {
    products: Rc<Vec<Product>>,
    names_lower: Vec<String>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the index contents from the given product list.
    pub fn rebuild(&mut self, products: Rc<Vec<Product>>) {
        self.names_lower = products.iter().map(|p| p.name.to_lowercase()).collect();
        self.products = products;
    }

    /// Returns up to `limit` products matching `text`, best match first.
    ///
    /// An empty or whitespace-only query yields an empty list, not the whole
    /// index.
    pub fn query(&self, text: &str, limit: usize) -> Vec<Product> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, usize)> = self
            .names_lower
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| score(&needle, name).map(|s| (s, idx)))
            .collect();

        // Best score first; ties broken by shorter (more specific) name,
        // then index order for determinism.
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.names_lower[a.1].len().cmp(&self.names_lower[b.1].len()))
                .then_with(|| a.1.cmp(&b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, idx)| self.products[idx].clone())
            .collect()
    }
}

/// Scores one lowercased name against a lowercased query, or `None` when the
/// name does not qualify.
fn score(needle: &str, name: &str) -> Option<f64> {
    if name.contains(needle) {
        return Some(SUBSTRING_SCORE);
    }

    let whole = jaro_winkler(needle, name);
    let best_token = name
        .split_whitespace()
        .map(|token| jaro_winkler(needle, token))
        .fold(0.0_f64, f64::max);
    let similarity = whole.max(best_token);

    (similarity >= MIN_SIMILARITY).then_some(similarity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Product {
        Product { name: name.to_string(), ..Product::default() }
    }

    fn index_of(names: &[&str]) -> SearchIndex {
        let mut index = SearchIndex::new();
        index.rebuild(Rc::new(names.iter().map(|n| named(n)).collect()));
        index
    }

    #[test]
    fn empty_query_returns_nothing() {
        let index = index_of(&["Milk 1L", "Bread"]);
        assert!(index.query("", 10).is_empty());
        assert!(index.query("   ", 10).is_empty());
    }

    #[test]
    fn exact_substring_ranks_first() {
        let index = index_of(&["Buttermilk", "Milk 1L", "Bread"]);
        let results = index.query("milk 1l", 10);
        assert_eq!(results[0].name, "Milk 1L");
    }

    #[test]
    fn typo_tolerant_ranking() {
        let index = index_of(&["Milk 1L", "Mlik 1L", "Bread"]);
        let results = index.query("milk", 10);

        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names[0], "Milk 1L");
        assert!(names.contains(&"Mlik 1L"));
        assert!(!names.contains(&"Bread"));
    }

    #[test]
    fn limit_caps_the_result_list() {
        let index = index_of(&["Milk 1L", "Milk 2L", "Milk 3L", "Milkshake"]);
        assert_eq!(index.query("milk", 2).len(), 2);
    }

    #[test]
    fn case_insensitive_matching() {
        let index = index_of(&["MILCH Frisch"]);
        let results = index.query("milch", 10);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn rebuild_replaces_contents_wholesale() {
        let mut index = index_of(&["Milk 1L"]);
        index.rebuild(Rc::new(vec![named("Bread")]));
        assert!(index.query("milk", 10).is_empty());
        assert_eq!(index.query("bread", 10).len(), 1);
    }

    #[test]
    fn unrelated_names_do_not_match() {
        let index = index_of(&["Bread", "Butter"]);
        assert!(index.query("milk", 10).is_empty());
    }
}
