//! Record source boundary.
//!
//! [`RecordSource`] is the fetch-like contract toward whatever holds the
//! remote catalog. Adapters live in `pantry-sources`; the orchestrator only
//! sees `Arc<dyn RecordSource>` and treats every [`SourceError`] the same
//! way: the source is unavailable.

use crate::error::SourceError;
use crate::types::{FilterCriteria, RecipeDraft, Recipe, RecipePatch, RecordId};
use async_trait::async_trait;
use std::sync::Arc;

pub type SourceResult<T> = Result<T, SourceError>;

/// Unified interface toward a remote record source.
///
/// Every call may suspend and every call may fail. Implementations must not
/// retry on their own; retry and fallback policy belongs to the caller.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Lightweight health check with no side effects.
    async fn probe(&self) -> bool;

    /// List records, filtered server-side when `criteria` is given.
    async fn list(&self, criteria: Option<&FilterCriteria>) -> SourceResult<Vec<Recipe>>;

    async fn get(&self, id: &RecordId) -> SourceResult<Recipe>;

    /// Create a record. The source assigns the id and creation time.
    async fn create(&self, draft: &RecipeDraft) -> SourceResult<Recipe>;

    async fn update(&self, id: &RecordId, patch: &RecipePatch) -> SourceResult<Recipe>;

    async fn delete(&self, id: &RecordId) -> SourceResult<()>;

    /// Server-side query completions.
    async fn suggest(&self, query: &str) -> SourceResult<Vec<String>>;

    /// Incremental search, at most `limit` records.
    async fn live_search(&self, query: &str, limit: usize) -> SourceResult<Vec<Recipe>>;
}

pub type SourceHandle = Arc<dyn RecordSource>;

/// A source that is never reachable. Pins the orchestrator to local mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSource;

impl OfflineSource {
    fn refuse<T>() -> SourceResult<T> {
        Err(SourceError::Unavailable("offline".to_string()))
    }
}

#[async_trait]
impl RecordSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    async fn probe(&self) -> bool {
        false
    }

    async fn list(&self, _criteria: Option<&FilterCriteria>) -> SourceResult<Vec<Recipe>> {
        Self::refuse()
    }

    async fn get(&self, _id: &RecordId) -> SourceResult<Recipe> {
        Self::refuse()
    }

    async fn create(&self, _draft: &RecipeDraft) -> SourceResult<Recipe> {
        Self::refuse()
    }

    async fn update(&self, _id: &RecordId, _patch: &RecipePatch) -> SourceResult<Recipe> {
        Self::refuse()
    }

    async fn delete(&self, _id: &RecordId) -> SourceResult<()> {
        Self::refuse()
    }

    async fn suggest(&self, _query: &str) -> SourceResult<Vec<String>> {
        Self::refuse()
    }

    async fn live_search(&self, _query: &str, _limit: usize) -> SourceResult<Vec<Recipe>> {
        Self::refuse()
    }
}
