//! Error types for pantry-core.
//!
//! Boundary errors ([`SourceError`], [`FavoritesError`], [`DatasetError`])
//! are logged and converted into local state by the orchestrator.
//! [`CatalogError`] is the cloneable advisory field that collaborators
//! inspect; it never wraps a live error value.

use crate::types::RecordId;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure crossing the record-source boundary.
///
/// The orchestrator treats every variant the same way ("source
/// unavailable"); the variants exist for logs.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unreachable: {0}")]
    Unavailable(String),
    #[error("source returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("record not found: {0}")]
    NotFound(RecordId),
}

/// Failure loading or saving the favorite identifier set.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("favorites I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("favorites store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure loading an external local dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not a valid record list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unknown enumerated value in user or wire input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
}

/// Which mutation a [`CatalogError::MutationFailed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Create => write!(f, "create"),
            MutationKind::Update => write!(f, "update"),
            MutationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Advisory error surfaced to presentation alongside a valid result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Failed to fetch recipes from server")]
    FetchFailed,
    #[error("Live search failed; showing local results")]
    LiveSearchFailed,
    #[error("Failed to {op} recipe {id} on server; the change was kept locally")]
    MutationFailed { op: MutationKind, id: RecordId },
    #[error("Failed to save favorites")]
    FavoritesNotSaved,
}
