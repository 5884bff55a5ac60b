//! Filter engine: criteria matching and relevance ranking.
//!
//! Pure functions over borrowed records. Nothing here touches the record
//! store; callers own the input and receive a fresh `Vec`.
//!
//! # Matching
//!
//! A record matches when all four hold:
//!
//! 1. the search string is empty, or it occurs (case-insensitively) in the
//!    title, description, author, any tag, or any ingredient;
//! 2. the category selector is the sentinel or equals the record category;
//! 3. the difficulty selector is the sentinel or equals the record difficulty;
//! 4. `cooking_time <= max_time`.
//!
//! # Ranking
//!
//! Only applied when the search string is non-empty. Records are ordered by
//! title tier (exact, starts-with, contains, other) and then by descending
//! rating. The sort is stable, so equally-ranked records keep their input
//! order.

use crate::types::{FilterCriteria, Recipe};
use std::cmp::Ordering;

/// How strongly a title matches the search needle. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TitleTier {
    Exact,
    StartsWith,
    Contains,
    Elsewhere,
}

impl TitleTier {
    /// Classify `title` against an already-lowercased needle.
    pub fn of(title: &str, needle: &str) -> Self {
        let title = title.to_lowercase();
        if title == needle {
            TitleTier::Exact
        } else if title.starts_with(needle) {
            TitleTier::StartsWith
        } else if title.contains(needle) {
            TitleTier::Contains
        } else {
            TitleTier::Elsewhere
        }
    }
}

/// `true` if `recipe` satisfies every predicate in `criteria`.
pub fn matches(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    let needle = criteria.search.to_lowercase();
    matches_lowered(recipe, criteria, &needle)
}

fn matches_lowered(recipe: &Recipe, criteria: &FilterCriteria, needle: &str) -> bool {
    (needle.is_empty() || text_matches(recipe, needle))
        && criteria.category.admits(recipe.category)
        && criteria.difficulty.admits(recipe.difficulty)
        && recipe.cooking_time <= criteria.max_time
}

fn text_matches(recipe: &Recipe, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);
    hit(&recipe.title)
        || hit(&recipe.description)
        || hit(&recipe.author)
        || recipe.tags.iter().any(|t| hit(t))
        || recipe.ingredients.iter().any(|i| hit(i))
}

/// Filter `records` by `criteria`, then rank by relevance if the search
/// string is non-empty. Input order is preserved otherwise.
pub fn filter(records: &[Recipe], criteria: &FilterCriteria) -> Vec<Recipe> {
    let needle = criteria.search.to_lowercase();
    let mut hits: Vec<Recipe> = records
        .iter()
        .filter(|r| matches_lowered(r, criteria, &needle))
        .cloned()
        .collect();

    if !needle.is_empty() {
        rank(&mut hits, &needle);
    }
    hits
}

/// Stable relevance sort against an already-lowercased needle.
pub fn rank(records: &mut [Recipe], needle: &str) {
    // Classify once per record rather than once per comparison.
    let mut keyed: Vec<(TitleTier, usize)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (TitleTier::of(&r.title, needle), i))
        .collect();

    keyed.sort_by(|(tier_a, a), (tier_b, b)| {
        tier_a
            .cmp(tier_b)
            .then_with(|| by_rating_desc(&records[*a], &records[*b]))
    });

    let order: Vec<Recipe> = keyed.into_iter().map(|(_, i)| records[i].clone()).collect();
    records.clone_from_slice(&order);
}

fn by_rating_desc(a: &Recipe, b: &Recipe) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
