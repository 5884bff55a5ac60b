//! Catalog statistics.

use crate::types::{Category, Difficulty, Recipe};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub categories: BTreeMap<Category, usize>,
    pub difficulties: BTreeMap<Difficulty, usize>,
    /// Mean rating, `0.0` for an empty catalog.
    pub average_rating: f64,
}

pub fn stats(records: &[Recipe]) -> CatalogStats {
    let mut categories = BTreeMap::new();
    let mut difficulties = BTreeMap::new();
    let mut rating_sum = 0.0;

    for r in records {
        *categories.entry(r.category).or_insert(0) += 1;
        *difficulties.entry(r.difficulty).or_insert(0) += 1;
        rating_sum += r.rating;
    }

    let average_rating = if records.is_empty() {
        0.0
    } else {
        rating_sum / records.len() as f64
    };

    CatalogStats {
        total: records.len(),
        categories,
        difficulties,
        average_rating,
    }
}
