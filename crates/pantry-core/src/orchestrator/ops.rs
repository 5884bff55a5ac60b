//! Mode-explicit boundary steps.
//!
//! Each function takes the current [`Connectivity`] as an argument, decides
//! whether the remote source is consulted, and reports what happened. No
//! function here touches orchestrator state: the caller applies the outcome.
//! Failures are logged here, once, at the boundary.

use crate::error::SourceError;
use crate::mode::Connectivity;
use crate::source::RecordSource;
use crate::types::{FilterCriteria, RecipeDraft, Recipe, RecipePatch, RecordId};
use tracing::{debug, warn};

/// Outcome of a listing attempt.
#[derive(Debug)]
pub enum Fetched {
    Remote(Vec<Recipe>),
    RemoteFailed(SourceError),
    /// Local mode: the caller filters the local catalog.
    Local,
}

/// Outcome of a live-search attempt.
#[derive(Debug)]
pub enum Live {
    Remote(Vec<Recipe>),
    /// Empty query: the unfiltered remote listing.
    Reset(Vec<Recipe>),
    RemoteFailed(SourceError),
    Local,
}

/// Outcome of a suggestion attempt.
#[derive(Debug)]
pub enum Suggested {
    Remote(Vec<String>),
    RemoteFailed(SourceError),
    Local,
}

/// Outcome of the sync-remote half of a mutation.
#[derive(Debug)]
pub enum Synced<T> {
    Remote(T),
    Failed(SourceError),
    /// Local mode: the source was not contacted.
    Skipped,
}

impl<T> Synced<T> {
    fn from_result(op: &'static str, source: &str, result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Synced::Remote(value),
            Err(e) => {
                warn!(op, source, error = %e, "record source call failed");
                Synced::Failed(e)
            }
        }
    }
}

pub async fn fetch(source: &dyn RecordSource, connectivity: Connectivity, criteria: &FilterCriteria) -> Fetched {
    if !connectivity.targets_remote() {
        return Fetched::Local;
    }
    match source.list(Some(criteria)).await {
        Ok(records) => {
            debug!(source = source.name(), count = records.len(), "remote listing");
            Fetched::Remote(records)
        }
        Err(e) => {
            warn!(op = "list", source = source.name(), error = %e, "record source call failed");
            Fetched::RemoteFailed(e)
        }
    }
}

pub async fn live(source: &dyn RecordSource, connectivity: Connectivity, query: &str, limit: usize) -> Live {
    if !connectivity.targets_remote() {
        return Live::Local;
    }
    let query = query.trim();
    let result = if query.is_empty() {
        source.list(None).await.map(Live::Reset)
    } else {
        source.live_search(query, limit).await.map(Live::Remote)
    };
    result.unwrap_or_else(|e| {
        warn!(op = "live_search", source = source.name(), error = %e, "record source call failed");
        Live::RemoteFailed(e)
    })
}

pub async fn suggest(source: &dyn RecordSource, connectivity: Connectivity, query: &str) -> Suggested {
    if !connectivity.targets_remote() {
        return Suggested::Local;
    }
    match source.suggest(query).await {
        Ok(list) => Suggested::Remote(list),
        Err(e) => {
            warn!(op = "suggest", source = source.name(), error = %e, "record source call failed");
            Suggested::RemoteFailed(e)
        }
    }
}

pub async fn sync_create(source: &dyn RecordSource, connectivity: Connectivity, draft: &RecipeDraft) -> Synced<Recipe> {
    if !connectivity.targets_remote() {
        return Synced::Skipped;
    }
    Synced::from_result("create", source.name(), source.create(draft).await)
}

pub async fn sync_update(
    source: &dyn RecordSource,
    connectivity: Connectivity,
    id: &RecordId,
    patch: &RecipePatch,
) -> Synced<Recipe> {
    if !connectivity.targets_remote() {
        return Synced::Skipped;
    }
    Synced::from_result("update", source.name(), source.update(id, patch).await)
}

pub async fn sync_delete(source: &dyn RecordSource, connectivity: Connectivity, id: &RecordId) -> Synced<()> {
    if !connectivity.targets_remote() {
        return Synced::Skipped;
    }
    Synced::from_result("delete", source.name(), source.delete(id).await)
}
