//! Search-box filtering of records.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::model::Resource;

/// Case-insensitive substring filter over a record's searchable fields.
///
/// Hits are ranked by fuzzy score, so matches at the start of a word come
/// before matches in the middle of one. Equal scores keep input order.
pub struct Matcher {
    ranker: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            ranker: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// `true` if `text` contains `pattern`, ignoring case.
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        text.to_lowercase().contains(&pattern.to_lowercase())
    }

    /// Best rank of `pattern` across the fields of `record` that contain it,
    /// or `None` when no field does.
    pub fn score<R: Resource>(&self, record: &R, pattern: &str) -> Option<i64> {
        record
            .search_fields()
            .iter()
            .filter(|field| self.matches(field, pattern))
            .map(|field| self.ranker.fuzzy_match(field, pattern).unwrap_or(0))
            .max()
    }

    /// Records containing `pattern`, best ranked first. A blank pattern keeps
    /// everything in input order.
    pub fn filter<R: Resource>(&self, records: &[R], pattern: &str) -> Vec<R> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return records.to_vec();
        }
        let mut hits: Vec<(i64, &R)> = records
            .iter()
            .filter_map(|r| self.score(r, pattern).map(|score| (score, r)))
            .collect();
        hits.sort_by(|a, b| b.0.cmp(&a.0));
        hits.into_iter().map(|(_, r)| r.clone()).collect()
    }
}
