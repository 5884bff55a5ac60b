//! Shared fixtures: the twelve-record catalog and orchestrators wired to an
//! in-memory source.

use pantry_core::dataset;
use pantry_core::favorites::FavoriteStore;
use pantry_core::source::SourceHandle;
use pantry_core::types::Recipe;
use pantry_core::SourceOrchestrator;
use pantry_sources::MemorySource;
use std::sync::Arc;

/// Titles of the twelve-record catalog, in catalog order.
pub const CATALOG_TITLES: &[&str] = &[
    "Truffle Mushroom Risotto",
    "Korean BBQ Tacos",
    "Chocolate Lava Cake",
    "Mediterranean Quinoa Bowl",
    "Spicy Thai Green Curry",
    "Classic French Croissants",
    "Matar Paneer",
    "Butter Chicken",
    "Vegetable Manchurian",
    "Chicken Manchurian",
    "Chicken Biryani",
    "Pasta Carbonara",
];

/// The twelve-record catalog.
pub fn catalog() -> Vec<Recipe> {
    dataset::builtin()
}

pub fn ids(records: &[Recipe]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

pub fn titles(records: &[Recipe]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

/// An online in-memory source serving the twelve-record catalog.
pub fn online_source() -> Arc<MemorySource> {
    Arc::new(MemorySource::with_records(catalog()))
}

/// An in-memory source that refuses every call.
pub fn offline_source() -> Arc<MemorySource> {
    Arc::new(MemorySource::offline())
}

/// Orchestrator over `source` with default settings and in-memory favorites.
pub fn orchestrator(source: &Arc<MemorySource>) -> SourceOrchestrator {
    SourceOrchestrator::new(source.clone() as SourceHandle)
}

/// Orchestrator over `source` with the given favorites store.
pub fn orchestrator_with_favorites(source: &Arc<MemorySource>, store: Box<dyn FavoriteStore>) -> SourceOrchestrator {
    SourceOrchestrator::builder(source.clone() as SourceHandle)
        .favorites(store)
        .build()
}
