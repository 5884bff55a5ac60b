//! Suggestion engine: query-as-you-type completions.
//!
//! [`suggest`] is a pure function of the query, the in-scope records and a
//! reference vocabulary. Matching is case-insensitive throughout and
//! duplicates are removed case-insensitively, keeping the first spelling
//! seen.
//!
//! Candidates are collected in priority order:
//!
//! 1. titles of in-scope records containing the query;
//! 2. tags of in-scope records containing the query;
//! 3. the leading (up to three) words of ingredients, when those words
//!    contain the query;
//! 4. vocabulary entries containing the query.
//!
//! When fewer than [`SuggestionLimits::widen_below`] candidates were found,
//! vocabulary entries sharing a word prefix with the query (in either
//! direction) are added. The list is then cut to
//! [`SuggestionLimits::max`] and ordered by tier: exact, starts-with,
//! contains, other. Insertion order is kept within a tier.

use crate::types::Recipe;
use std::collections::HashSet;

/// Number of leading ingredient words offered as a suggestion.
const INGREDIENT_WORDS: usize = 3;

/// Tunables for [`suggest_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    /// Maximum suggestions returned.
    pub max: usize,
    /// Queries shorter than this (in characters) yield nothing.
    pub min_query_len: usize,
    /// Widen with prefix overlap when fewer candidates than this were found.
    pub widen_below: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self {
            max: 8,
            min_query_len: 2,
            widen_below: 5,
        }
    }
}

/// Suggestions for `query` with the default limits.
pub fn suggest<V: AsRef<str>>(query: &str, records: &[Recipe], vocabulary: &[V]) -> Vec<String> {
    suggest_with(query, records, vocabulary, SuggestionLimits::default())
}

/// Suggestions for `query` with explicit limits.
pub fn suggest_with<V: AsRef<str>>(
    query: &str,
    records: &[Recipe],
    vocabulary: &[V],
    limits: SuggestionLimits,
) -> Vec<String> {
    if query.is_empty() || query.chars().count() < limits.min_query_len {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut found = Candidates::default();

    for recipe in records {
        if contains(&recipe.title, &needle) {
            found.push(&recipe.title);
        }
    }
    for recipe in records {
        for tag in recipe.tags.iter().filter(|t| contains(t, &needle)) {
            found.push(tag);
        }
    }
    for recipe in records {
        for ingredient in &recipe.ingredients {
            let lead = leading_words(ingredient, INGREDIENT_WORDS);
            if contains(&lead, &needle) {
                found.push(&lead);
            }
        }
    }
    for term in vocabulary.iter().map(|t| t.as_ref()) {
        if contains(term, &needle) {
            found.push(term);
        }
    }

    if found.len() < limits.widen_below {
        let query_words: Vec<&str> = needle.split_whitespace().collect();
        for term in vocabulary.iter().map(|t| t.as_ref()) {
            if shares_word_prefix(term, &query_words) {
                found.push(term);
            }
        }
    }

    let mut out = found.items;
    out.truncate(limits.max);
    out.sort_by_key(|s| tier(s, &needle));
    out
}

/// Insertion-ordered set with case-insensitive membership.
#[derive(Default)]
struct Candidates {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl Candidates {
    fn push(&mut self, candidate: &str) {
        if self.seen.insert(candidate.to_lowercase()) {
            self.items.push(candidate.to_string());
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn leading_words(s: &str, n: usize) -> String {
    s.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

fn shares_word_prefix(term: &str, query_words: &[&str]) -> bool {
    let term = term.to_lowercase();
    term.split_whitespace().any(|word| {
        query_words
            .iter()
            .any(|q| word.starts_with(q) || q.starts_with(word))
    })
}

fn tier(candidate: &str, needle: &str) -> u8 {
    let lower = candidate.to_lowercase();
    if lower == needle {
        0
    } else if lower.starts_with(needle) {
        1
    } else if lower.contains(needle) {
        2
    } else {
        3
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
