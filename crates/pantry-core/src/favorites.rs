//! Favorite overlay: a persisted set of record ids projected onto records
//! at read time.
//!
//! # Architecture
//!
//! ```text
//! FavoriteStore (durable key-value) ◄── load once / save on every toggle
//!          │
//!          ▼
//! FavoriteOverlay ── project(&[Recipe]) ──► Vec<Recipe> with is_favorite set
//! ```
//!
//! The overlay is keyed by id only, so it survives any replacement of the
//! record sets. A toggle is persisted before the in-memory set changes: if
//! the write fails, the overlay keeps its previous state and the caller gets
//! the error.

use crate::error::FavoritesError;
use crate::types::{Recipe, RecordId};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Key the id list is stored under.
pub const DEFAULT_FAVORITES_KEY: &str = "recipe-favorites";

// ---------------------------------------------------------------------------
// Durable store boundary
// ---------------------------------------------------------------------------

/// Durable local storage for the favorite id list.
///
/// Both calls are synchronous from the overlay's point of view.
pub trait FavoriteStore: Send + Sync {
    fn load_favorites(&self) -> Result<Vec<RecordId>, FavoritesError>;
    fn save_favorites(&self, ids: &[RecordId]) -> Result<(), FavoritesError>;
}

impl<S: FavoriteStore + ?Sized> FavoriteStore for Arc<S> {
    fn load_favorites(&self) -> Result<Vec<RecordId>, FavoritesError> {
        (**self).load_favorites()
    }

    fn save_favorites(&self, ids: &[RecordId]) -> Result<(), FavoritesError> {
        (**self).save_favorites(ids)
    }
}

/// A JSON object on disk used as a key-value store; the id list lives under
/// one key and every other key is preserved on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, DEFAULT_FAVORITES_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, FavoritesError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Map::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl FavoriteStore for JsonFileStore {
    fn load_favorites(&self) -> Result<Vec<RecordId>, FavoritesError> {
        let mut object = self.read_object()?;
        match object.remove(&self.key) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_favorites(&self, ids: &[RecordId]) -> Result<(), FavoritesError> {
        let mut object = self.read_object()?;
        object.insert(self.key.clone(), serde_json::to_value(ids)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write-then-rename: a crash mid-write leaves the old file intact.
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&mut file, &object)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = ids.len(), "favorites saved");
        Ok(())
    }
}

/// In-process store. Counts writes and can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ids: Mutex<Vec<RecordId>>,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            ids: Mutex::new(ids.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Make every subsequent load and save fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The last persisted id list.
    pub fn persisted(&self) -> Vec<RecordId> {
        self.ids.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn check(&self) -> Result<(), FavoritesError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("favorite store unavailable").into());
        }
        Ok(())
    }
}

impl FavoriteStore for MemoryStore {
    fn load_favorites(&self) -> Result<Vec<RecordId>, FavoritesError> {
        self.check()?;
        Ok(self.persisted())
    }

    fn save_favorites(&self, ids: &[RecordId]) -> Result<(), FavoritesError> {
        self.check()?;
        *self.ids.lock().unwrap_or_else(|e| e.into_inner()) = ids.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

pub struct FavoriteOverlay {
    ids: BTreeSet<RecordId>,
    store: Box<dyn FavoriteStore>,
}

impl std::fmt::Debug for FavoriteOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteOverlay").field("ids", &self.ids).finish_non_exhaustive()
    }
}

impl FavoriteOverlay {
    /// Load the persisted set once. A store that cannot be read starts the
    /// overlay empty; the failure is logged.
    pub fn load(store: Box<dyn FavoriteStore>) -> Self {
        let ids = match store.load_favorites() {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!(error = %e, "could not load favorites; starting with none");
                BTreeSet::new()
            }
        };
        Self { ids, store }
    }

    /// Flip membership of `id` and persist the full set.
    ///
    /// Returns the new membership. On a failed write the overlay is left
    /// unchanged.
    pub fn toggle(&mut self, id: &RecordId) -> Result<bool, FavoritesError> {
        let mut next = self.ids.clone();
        let now_favorite = if next.remove(id) {
            false
        } else {
            next.insert(id.clone());
            true
        };
        let list: Vec<RecordId> = next.iter().cloned().collect();
        self.store.save_favorites(&list)?;
        self.ids = next;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// A copy of `records` with `is_favorite` set from the overlay.
    pub fn project(&self, records: &[Recipe]) -> Vec<Recipe> {
        records
            .iter()
            .map(|r| Recipe {
                is_favorite: self.is_favorite(&r.id),
                ..r.clone()
            })
            .collect()
    }

    /// Current ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
