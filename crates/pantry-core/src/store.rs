//! Record store: the visible list plus the two catalogs behind it.
//!
//! The store holds three sequences:
//!
//! - `visible`: what presentation is currently shown (already filtered);
//! - the remote catalog: the last unfiltered listing from the source;
//! - the local catalog: the fallback dataset, seeded once when local mode
//!   is first engaged and mutated in place afterwards.
//!
//! The two catalogs evolve independently and are never merged. Which one is
//! authoritative is decided by the caller's [`SourceMode`], passed to every
//! operation that needs it.
//!
//! Only the orchestrator owns a `RecordStore`; the engines read slices of it.

use crate::mode::SourceMode;
use crate::types::{Recipe, RecipePatch, RecordId};

/// An in-memory edit applied to the visible list and one catalog.
#[derive(Debug, Clone)]
pub enum LocalChange {
    /// Prepend a new record.
    Insert(Recipe),
    /// Replace the record with the same id.
    Replace(Recipe),
    /// Merge a partial update into the record with this id.
    Merge(RecordId, RecipePatch),
    /// Drop the record with this id.
    Remove(RecordId),
}

#[derive(Debug, Default)]
pub struct RecordStore {
    visible: Vec<Recipe>,
    remote: Vec<Recipe>,
    local: Option<Vec<Recipe>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> &[Recipe] {
        &self.visible
    }

    pub fn replace_visible(&mut self, records: Vec<Recipe>) {
        self.visible = records;
    }

    pub fn set_remote_catalog(&mut self, records: Vec<Recipe>) {
        self.remote = records;
    }

    /// Seed the local catalog from `dataset` if it has not been seeded yet,
    /// and return it. Later calls keep local edits.
    pub fn engage_local(&mut self, dataset: &[Recipe]) -> &[Recipe] {
        self.local.get_or_insert_with(|| dataset.to_vec())
    }

    /// The authoritative catalog for `mode`. Empty if never populated.
    pub fn catalog(&self, mode: SourceMode) -> &[Recipe] {
        match mode {
            SourceMode::Remote => &self.remote,
            SourceMode::LocalFallback => self.local.as_deref().unwrap_or(&[]),
        }
    }

    /// `true` when no records are held anywhere.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
            && self.remote.is_empty()
            && self.local.as_ref().is_none_or(|l| l.is_empty())
    }

    /// Look a record up by id: the visible list first, then the catalog for
    /// `mode`, then the other catalog.
    pub fn get(&self, id: &RecordId, mode: SourceMode) -> Option<&Recipe> {
        let other = match mode {
            SourceMode::Remote => SourceMode::LocalFallback,
            SourceMode::LocalFallback => SourceMode::Remote,
        };
        find(&self.visible, id)
            .or_else(|| find(self.catalog(mode), id))
            .or_else(|| find(self.catalog(other), id))
    }

    pub fn contains_id(&self, id: &RecordId) -> bool {
        self.get(id, SourceMode::Remote).is_some()
    }

    /// A fresh local id derived from `now_millis`, bumped until it collides
    /// with nothing in the store.
    pub fn local_id(&self, now_millis: i64) -> RecordId {
        let mut candidate = now_millis;
        loop {
            let id = RecordId::new(candidate.to_string());
            if !self.contains_id(&id) {
                return id;
            }
            candidate += 1;
        }
    }

    /// Apply `change` to the visible list and the catalog for `mode`.
    ///
    /// Returns the affected record: the inserted one, the replacement or
    /// merge result, or the removed one. `None` when the id was not held.
    pub fn apply(&mut self, mode: SourceMode, change: LocalChange) -> Option<Recipe> {
        let catalog = match mode {
            SourceMode::Remote => Some(&mut self.remote),
            SourceMode::LocalFallback => self.local.as_mut(),
        };
        let visible = &mut self.visible;

        match change {
            LocalChange::Insert(recipe) => {
                visible.insert(0, recipe.clone());
                if let Some(catalog) = catalog {
                    catalog.insert(0, recipe.clone());
                }
                Some(recipe)
            }
            LocalChange::Replace(recipe) => {
                let mut hit = replace(visible, &recipe);
                if let Some(catalog) = catalog {
                    hit |= replace(catalog, &recipe);
                }
                hit.then_some(recipe)
            }
            LocalChange::Merge(id, patch) => {
                let mut merged = merge(visible, &id, &patch);
                if let Some(catalog) = catalog {
                    merged = merge(catalog, &id, &patch).or(merged);
                }
                merged
            }
            LocalChange::Remove(id) => {
                let mut removed = remove(visible, &id);
                if let Some(catalog) = catalog {
                    removed = remove(catalog, &id).or(removed);
                }
                removed
            }
        }
    }
}

fn find<'a>(records: &'a [Recipe], id: &RecordId) -> Option<&'a Recipe> {
    records.iter().find(|r| &r.id == id)
}

fn replace(records: &mut [Recipe], recipe: &Recipe) -> bool {
    match records.iter_mut().find(|r| r.id == recipe.id) {
        Some(slot) => {
            *slot = recipe.clone();
            true
        }
        None => false,
    }
}

fn merge(records: &mut [Recipe], id: &RecordId, patch: &RecipePatch) -> Option<Recipe> {
    let slot = records.iter_mut().find(|r| &r.id == id)?;
    patch.apply_to(slot);
    Some(slot.clone())
}

fn remove(records: &mut Vec<Recipe>, id: &RecordId) -> Option<Recipe> {
    let index = records.iter().position(|r| &r.id == id)?;
    Some(records.remove(index))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Difficulty};
    use chrono::Utc;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: RecordId::from(id),
            title: format!("Recipe {id}"),
            description: String::new(),
            image: String::new(),
            category: Category::Soup,
            difficulty: Difficulty::Medium,
            cooking_time: 20,
            servings: 4,
            ingredients: vec![],
            instructions: vec![],
            tags: vec![],
            rating: 4.0,
            author: "cook".to_string(),
            created_at: Utc::now(),
            is_favorite: false,
        }
    }

    #[test]
    fn local_catalog_is_seeded_once() {
        let mut store = RecordStore::new();
        store.engage_local(&[recipe("a")]);
        store.apply(SourceMode::LocalFallback, LocalChange::Insert(recipe("b")));
        store.engage_local(&[recipe("a")]);
        assert_eq!(store.catalog(SourceMode::LocalFallback).len(), 2);
    }

    #[test]
    fn catalogs_stay_separate() {
        let mut store = RecordStore::new();
        store.set_remote_catalog(vec![recipe("r")]);
        store.engage_local(&[recipe("l")]);
        store.apply(SourceMode::LocalFallback, LocalChange::Remove(RecordId::from("l")));
        assert_eq!(store.catalog(SourceMode::Remote).len(), 1);
        assert!(store.catalog(SourceMode::LocalFallback).is_empty());
    }

    #[test]
    fn lookup_prefers_visible_then_mode_catalog() {
        let mut store = RecordStore::new();
        let mut shown = recipe("x");
        shown.title = "shown".to_string();
        store.replace_visible(vec![shown]);
        store.set_remote_catalog(vec![recipe("x"), recipe("only-remote")]);
        store.engage_local(&[recipe("only-local")]);

        let id = RecordId::from("x");
        assert_eq!(store.get(&id, SourceMode::Remote).unwrap().title, "shown");
        assert!(store.get(&RecordId::from("only-local"), SourceMode::Remote).is_some());
        assert!(store.get(&RecordId::from("missing"), SourceMode::Remote).is_none());
    }

    #[test]
    fn local_ids_are_bumped_past_collisions() {
        let mut store = RecordStore::new();
        store.replace_visible(vec![recipe("1000"), recipe("1001")]);
        assert_eq!(store.local_id(1000).as_str(), "1002");
        assert_eq!(store.local_id(5).as_str(), "5");
    }

    #[test]
    fn merge_touches_visible_and_catalog() {
        let mut store = RecordStore::new();
        store.engage_local(&[recipe("m")]);
        store.replace_visible(vec![recipe("m")]);
        let patch = RecipePatch {
            title: Some("Renamed".to_string()),
            ..RecipePatch::default()
        };
        let merged = store
            .apply(SourceMode::LocalFallback, LocalChange::Merge(RecordId::from("m"), patch))
            .unwrap();
        assert_eq!(merged.title, "Renamed");
        assert_eq!(store.visible()[0].title, "Renamed");
        assert_eq!(store.catalog(SourceMode::LocalFallback)[0].title, "Renamed");
    }

    #[test]
    fn empty_means_nothing_anywhere() {
        let mut store = RecordStore::new();
        assert!(store.is_empty());
        store.engage_local(&[]);
        assert!(store.is_empty());
        store.set_remote_catalog(vec![recipe("r")]);
        assert!(!store.is_empty());
    }
}
