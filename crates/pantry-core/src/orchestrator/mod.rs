//! Source orchestrator: decides where records come from and coordinates
//! overlapping asynchronous requests.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────── probe gate ────────────┐
//! initialize() ──►│ Probing ─► Remote | LocalFallback  │
//!                 └────────────────────────────────────┘
//!                                   │ connectivity
//!                                   ▼
//! set_filter ─► fetch channel ──┐
//! live_search ─► live channel ──┼─► ops::* (boundary) ─► RecordStore ─► FavoriteOverlay ─► watch<CatalogView>
//! request_suggestions ─► suggest channel ┘
//! ```
//!
//! Each channel has its own [`Generation`]: a dispatch that is superseded
//! inside its debounce window never reaches the source, and a response whose
//! ticket is no longer current never touches the visible list. The caller
//! that awaited a stale dispatch still gets its own result back.
//!
//! Boundary failures never surface as errors. They downgrade the mode, fall
//! back to local data where the operation calls for it, and set the
//! advisory [`CatalogError`] field of the view.
//!
//! Internal state sits behind a synchronous mutex that is never held across
//! an `.await`. The probe gate is an async mutex: while a probe is
//! outstanding, every other operation waits for the mode to settle.

mod channel;
mod ops;
mod view;

pub use channel::{Generation, Resolution, Ticket};
pub use ops::{Fetched, Live, Suggested, Synced};
pub use view::CatalogView;

use crate::config::Config;
use crate::dataset;
use crate::error::{CatalogError, MutationKind};
use crate::favorites::{FavoriteOverlay, FavoriteStore, MemoryStore};
use crate::filter;
use crate::mode::{Connectivity, SourceMode};
use crate::source::SourceHandle;
use crate::stats::{self, CatalogStats};
use crate::store::{LocalChange, RecordStore};
use crate::suggest::{self, SuggestionLimits};
use crate::types::{FilterCriteria, RecipeDraft, Recipe, RecipePatch, RecordId};
use crate::vocabulary::REFERENCE_VOCABULARY;
use chrono::Utc;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Timing and sizing knobs, usually taken from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fetch_debounce: Duration,
    pub live_debounce: Duration,
    pub suggest_debounce: Duration,
    pub live_limit: usize,
    pub suggestions: SuggestionLimits,
    pub default_max_time: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Config::defaults())
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        let search = &config.search;
        Self {
            fetch_debounce: Duration::from_millis(search.fetch_debounce_ms),
            live_debounce: Duration::from_millis(search.live_debounce_ms),
            suggest_debounce: Duration::from_millis(search.suggest_debounce_ms),
            live_limit: search.live_limit,
            suggestions: SuggestionLimits {
                max: search.max_suggestions,
                min_query_len: search.min_query_len,
                widen_below: search.widen_threshold,
            },
            default_max_time: config.filter.default_max_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Result of a create, update or delete. The local effect always happened;
/// `error` is set when the remote half failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub error: Option<CatalogError>,
}

impl<T> Mutation<T> {
    pub fn is_synced(&self) -> bool {
        self.error.is_none()
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

struct State {
    connectivity: Connectivity,
    store: RecordStore,
    favorites: FavoriteOverlay,
    criteria: FilterCriteria,
    suggestions: Vec<String>,
    error: Option<CatalogError>,
    in_flight: usize,
}

struct Shared {
    source: SourceHandle,
    dataset: Vec<Recipe>,
    vocabulary: Vec<String>,
    settings: Settings,
    state: Mutex<State>,
    probe_gate: tokio::sync::Mutex<()>,
    /// Probes settled so far; bumped while holding the gate.
    probes: AtomicU64,
    fetches: Generation,
    lives: Generation,
    suggestions: Generation,
    view: watch::Sender<CatalogView>,
}

/// Cheaply cloneable handle; clones share all state.
#[derive(Clone)]
pub struct SourceOrchestrator {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for SourceOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceOrchestrator")
            .field("source", &self.shared.source.name())
            .field("connectivity", &self.connectivity())
            .finish_non_exhaustive()
    }
}

/// Builder for [`SourceOrchestrator`].
pub struct OrchestratorBuilder {
    source: SourceHandle,
    dataset: Option<Vec<Recipe>>,
    favorites: Option<Box<dyn FavoriteStore>>,
    vocabulary: Option<Vec<String>>,
    settings: Settings,
}

impl OrchestratorBuilder {
    /// Replace the built-in local dataset.
    pub fn dataset(mut self, records: Vec<Recipe>) -> Self {
        self.dataset = Some(records);
        self
    }

    /// Durable favorites store. Defaults to an in-memory one.
    pub fn favorites(mut self, store: Box<dyn FavoriteStore>) -> Self {
        self.favorites = Some(store);
        self
    }

    /// Replace the reference vocabulary used for local suggestions.
    pub fn vocabulary(mut self, terms: Vec<String>) -> Self {
        self.vocabulary = Some(terms);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> SourceOrchestrator {
        let favorites = FavoriteOverlay::load(self.favorites.unwrap_or_else(|| Box::new(MemoryStore::new())));
        let criteria = FilterCriteria::default().with_max_time(self.settings.default_max_time);
        let state = State {
            connectivity: Connectivity::Probing,
            store: RecordStore::new(),
            favorites,
            criteria,
            suggestions: Vec::new(),
            error: None,
            in_flight: 0,
        };
        let (view, _) = watch::channel(CatalogView::default());
        SourceOrchestrator {
            shared: Arc::new(Shared {
                source: self.source,
                dataset: self.dataset.unwrap_or_else(dataset::builtin),
                vocabulary: self
                    .vocabulary
                    .unwrap_or_else(|| REFERENCE_VOCABULARY.iter().map(|t| t.to_string()).collect()),
                settings: self.settings,
                state: Mutex::new(state),
                probe_gate: tokio::sync::Mutex::new(()),
                probes: AtomicU64::new(0),
                fetches: Generation::new(),
                lives: Generation::new(),
                suggestions: Generation::new(),
                view,
            }),
        }
    }
}

/// Decrements the in-flight count when a boundary call ends, however it ends.
struct InFlight<'a>(&'a SourceOrchestrator);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut st = self.0.state();
        st.in_flight = st.in_flight.saturating_sub(1);
        self.0.publish(&st);
    }
}

impl SourceOrchestrator {
    pub fn builder(source: SourceHandle) -> OrchestratorBuilder {
        OrchestratorBuilder {
            source,
            dataset: None,
            favorites: None,
            vocabulary: None,
            settings: Settings::default(),
        }
    }

    /// Orchestrator with the built-in dataset, default settings and
    /// in-memory favorites.
    pub fn new(source: SourceHandle) -> Self {
        Self::builder(source).build()
    }

    // -- connectivity -------------------------------------------------------

    /// Probe the source once and settle the mode.
    ///
    /// Reachable: `Remote`, followed by an initial fetch with the current
    /// criteria. Unreachable: `LocalFallback`, with the visible list filled
    /// from the local dataset before returning. A call made while another
    /// probe is outstanding waits for it and returns its outcome without
    /// probing again.
    pub async fn initialize(&self) -> SourceMode {
        let seen = self.shared.probes.load(Ordering::SeqCst);
        let gate = self.shared.probe_gate.lock().await;
        if self.shared.probes.load(Ordering::SeqCst) != seen {
            // Another call probed while this one waited.
            return self.mode().unwrap_or(SourceMode::LocalFallback);
        }

        {
            let mut st = self.state();
            st.connectivity = Connectivity::Probing;
            self.publish(&st);
        }
        info!(source = self.shared.source.name(), "probing record source");
        let reachable = self.boundary(self.shared.source.probe()).await;
        let connectivity = Connectivity::after_probe(reachable);
        let mode = connectivity.mode().unwrap_or(SourceMode::LocalFallback);

        {
            let mut st = self.state();
            st.connectivity = connectivity;
            if mode == SourceMode::LocalFallback {
                // Supersede any fetch that was waiting on the gate.
                self.shared.fetches.issue();
                let criteria = st.criteria.clone();
                let visible = filter::filter(st.store.engage_local(&self.shared.dataset), &criteria);
                st.store.replace_visible(visible);
            }
            self.publish(&st);
        }
        self.shared.probes.fetch_add(1, Ordering::SeqCst);
        info!(%mode, "source mode settled");
        drop(gate);

        if mode == SourceMode::Remote {
            let criteria = self.criteria();
            self.fetch_records(&criteria).await;
        }
        mode
    }

    /// The settled mode, or `None` while probing.
    pub fn mode(&self) -> Option<SourceMode> {
        self.connectivity().mode()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.state().connectivity
    }

    // -- fetch channel ------------------------------------------------------

    /// Fetch records for `criteria` now, bypassing the debounce window.
    ///
    /// Always yields a list. It updates the visible list only if no newer
    /// fetch was issued meanwhile.
    pub async fn fetch_records(&self, criteria: &FilterCriteria) -> Vec<Recipe> {
        let ticket = self.shared.fetches.issue();
        self.fetch_with(ticket, criteria).await.0
    }

    /// Replace the active criteria and schedule one debounced fetch.
    ///
    /// Several calls inside the window coalesce into a single fetch with the
    /// latest criteria. Must be called from within a Tokio runtime.
    pub fn set_filter(&self, criteria: FilterCriteria) -> JoinHandle<Resolution> {
        self.state().criteria = criteria;
        let ticket = self.shared.fetches.issue();
        let this = self.clone();
        tokio::spawn(async move {
            let window = this.shared.settings.fetch_debounce;
            if !this.shared.fetches.quiesce(ticket, window).await {
                return Resolution::Coalesced;
            }
            let criteria = this.criteria();
            this.fetch_with(ticket, &criteria).await.1
        })
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state().criteria.clone()
    }

    async fn fetch_with(&self, ticket: Ticket, criteria: &FilterCriteria) -> (Vec<Recipe>, Resolution) {
        let connectivity = self.settled_connectivity().await;
        let fetched = self
            .boundary(ops::fetch(self.shared.source.as_ref(), connectivity, criteria))
            .await;

        let mut st = self.state();
        let current = self.shared.fetches.is_current(ticket);
        let records = match fetched {
            Fetched::Remote(records) => {
                self.note_success(&mut st);
                if st.connectivity.targets_remote() {
                    if criteria.is_unfiltered(self.shared.settings.default_max_time) {
                        st.store.set_remote_catalog(records.clone());
                    }
                    if current {
                        st.error = None;
                    }
                    records
                } else {
                    debug!("discarding remote listing that resolved after fallback");
                    filter::filter(st.store.engage_local(&self.shared.dataset), criteria)
                }
            }
            Fetched::RemoteFailed(_) => {
                self.note_failure(&mut st);
                st.error = Some(CatalogError::FetchFailed);
                if st.store.is_empty() {
                    warn!("no records held; substituting the local dataset");
                    st.store.engage_local(&self.shared.dataset).to_vec()
                } else {
                    st.store.visible().to_vec()
                }
            }
            Fetched::Local => filter::filter(st.store.engage_local(&self.shared.dataset), criteria),
        };

        let resolution = if current {
            st.store.replace_visible(records.clone());
            Resolution::Applied
        } else {
            debug!(ticket = ticket.get(), "stale fetch response discarded");
            Resolution::Stale
        };
        self.publish(&st);
        (st.favorites.project(&records), resolution)
    }

    // -- live search channel ------------------------------------------------

    /// Schedule a debounced live search for `query`.
    ///
    /// Only the last call inside the window dispatches. Of overlapping
    /// dispatches, only the most recently issued one may update the visible
    /// list. Must be called from within a Tokio runtime.
    pub fn live_search(&self, query: impl Into<String>) -> JoinHandle<Resolution> {
        let query = query.into();
        let ticket = self.shared.lives.issue();
        let this = self.clone();
        tokio::spawn(async move {
            let window = this.shared.settings.live_debounce;
            if !this.shared.lives.quiesce(ticket, window).await {
                return Resolution::Coalesced;
            }
            this.live_with(ticket, &query).await.1
        })
    }

    /// Live search without the debounce window.
    pub async fn live_search_now(&self, query: &str) -> Vec<Recipe> {
        let ticket = self.shared.lives.issue();
        self.live_with(ticket, query).await.0
    }

    async fn live_with(&self, ticket: Ticket, query: &str) -> (Vec<Recipe>, Resolution) {
        let connectivity = self.settled_connectivity().await;
        let limit = self.shared.settings.live_limit;
        let live = self
            .boundary(ops::live(self.shared.source.as_ref(), connectivity, query, limit))
            .await;

        let mut st = self.state();
        let current = self.shared.lives.is_current(ticket);
        let records = match live {
            Live::Remote(records) | Live::Reset(records) if self.note_success(&mut st) => records,
            Live::Remote(_) | Live::Reset(_) => {
                debug!("discarding live results that resolved after fallback");
                self.local_live(&mut st, query)
            }
            Live::RemoteFailed(_) => {
                self.note_failure(&mut st);
                st.error = Some(CatalogError::LiveSearchFailed);
                self.local_live(&mut st, query)
            }
            Live::Local => self.local_live(&mut st, query),
        };

        let resolution = if current {
            st.store.replace_visible(records.clone());
            Resolution::Applied
        } else {
            debug!(ticket = ticket.get(), query, "stale live-search response discarded");
            Resolution::Stale
        };
        self.publish(&st);
        (st.favorites.project(&records), resolution)
    }

    fn local_live(&self, st: &mut State, query: &str) -> Vec<Recipe> {
        let criteria = st.criteria.clone().with_search(query.trim());
        filter::filter(st.store.engage_local(&self.shared.dataset), &criteria)
    }

    // -- suggestion channel -------------------------------------------------

    /// Schedule debounced suggestions for `query`.
    ///
    /// Queries below the minimum length clear the suggestions immediately
    /// and supersede anything pending. Must be called from within a Tokio
    /// runtime.
    pub fn request_suggestions(&self, query: impl Into<String>) -> JoinHandle<Resolution> {
        let query = query.into();
        let ticket = self.shared.suggestions.issue();
        if self.too_short(&query) {
            self.clear_suggestions();
            return tokio::spawn(std::future::ready(Resolution::Skipped));
        }
        let this = self.clone();
        tokio::spawn(async move {
            let window = this.shared.settings.suggest_debounce;
            if !this.shared.suggestions.quiesce(ticket, window).await {
                return Resolution::Coalesced;
            }
            this.suggest_with(ticket, &query).await.1
        })
    }

    /// Suggestions for `query` without the debounce window.
    pub async fn suggestions_for(&self, query: &str) -> Vec<String> {
        let ticket = self.shared.suggestions.issue();
        if self.too_short(query) {
            self.clear_suggestions();
            return Vec::new();
        }
        self.suggest_with(ticket, query).await.0
    }

    fn too_short(&self, query: &str) -> bool {
        query.chars().count() < self.shared.settings.suggestions.min_query_len
    }

    fn clear_suggestions(&self) {
        let mut st = self.state();
        st.suggestions.clear();
        self.publish(&st);
    }

    async fn suggest_with(&self, ticket: Ticket, query: &str) -> (Vec<String>, Resolution) {
        let connectivity = self.settled_connectivity().await;
        let outcome = self
            .boundary(ops::suggest(self.shared.source.as_ref(), connectivity, query))
            .await;

        let mut st = self.state();
        let limits = self.shared.settings.suggestions;
        let mut list = match outcome {
            Suggested::Remote(list) if self.note_success(&mut st) => list,
            Suggested::Remote(_) | Suggested::Local => {
                suggest::suggest_with(query, st.store.visible(), self.shared.vocabulary.as_slice(), limits)
            }
            // Suggestions degrade silently: empty list, no advisory.
            Suggested::RemoteFailed(_) => {
                self.note_failure(&mut st);
                Vec::new()
            }
        };
        list.truncate(limits.max);

        let resolution = if self.shared.suggestions.is_current(ticket) {
            st.suggestions = list.clone();
            Resolution::Applied
        } else {
            Resolution::Stale
        };
        self.publish(&st);
        (list, resolution)
    }

    // -- mutations ----------------------------------------------------------

    /// Create a record. The id comes from the source in remote mode and from
    /// the clock in local mode or after a failed remote create.
    pub async fn create_record(&self, draft: RecipeDraft) -> Mutation<Recipe> {
        let connectivity = self.settled_connectivity().await;
        let synced = self
            .boundary(ops::sync_create(self.shared.source.as_ref(), connectivity, &draft))
            .await;

        let mut st = self.state();
        let (recipe, error) = match synced {
            Synced::Remote(recipe) => {
                self.note_success(&mut st);
                (recipe, None)
            }
            failed_or_skipped => {
                let failed = matches!(failed_or_skipped, Synced::Failed(_));
                if failed {
                    self.note_failure(&mut st);
                }
                let now = Utc::now();
                let id = st.store.local_id(now.timestamp_millis());
                let error = failed.then(|| CatalogError::MutationFailed {
                    op: MutationKind::Create,
                    id: id.clone(),
                });
                (draft.into_recipe(id, now), error)
            }
        };

        let mode = self.active_mode(&mut st);
        st.store.apply(mode, LocalChange::Insert(recipe.clone()));
        self.record_error(&mut st, &error);
        self.publish(&st);
        Mutation {
            value: self.project_one(&st, recipe),
            error,
        }
    }

    /// Update a record. Returns the updated record, or `None` when it is
    /// held nowhere and the remote update did not produce one.
    pub async fn update_record(&self, id: &RecordId, patch: RecipePatch) -> Mutation<Option<Recipe>> {
        let connectivity = self.settled_connectivity().await;
        let synced = self
            .boundary(ops::sync_update(self.shared.source.as_ref(), connectivity, id, &patch))
            .await;

        let mut st = self.state();
        let (value, error) = match synced {
            Synced::Remote(recipe) => {
                self.note_success(&mut st);
                let mode = self.active_mode(&mut st);
                st.store.apply(mode, LocalChange::Replace(recipe.clone()));
                (Some(recipe), None)
            }
            failed_or_skipped => {
                let failed = matches!(failed_or_skipped, Synced::Failed(_));
                if failed {
                    self.note_failure(&mut st);
                }
                let mode = self.active_mode(&mut st);
                let merged = st.store.apply(mode, LocalChange::Merge(id.clone(), patch));
                let error = failed.then(|| CatalogError::MutationFailed {
                    op: MutationKind::Update,
                    id: id.clone(),
                });
                (merged, error)
            }
        };

        self.record_error(&mut st, &error);
        self.publish(&st);
        Mutation {
            value: value.map(|r| self.project_one(&st, r)),
            error,
        }
    }

    /// Delete a record. Returns whether a record was removed (always `true`
    /// after a successful remote delete).
    pub async fn delete_record(&self, id: &RecordId) -> Mutation<bool> {
        let connectivity = self.settled_connectivity().await;
        let synced = self
            .boundary(ops::sync_delete(self.shared.source.as_ref(), connectivity, id))
            .await;

        let mut st = self.state();
        let (value, error) = match synced {
            Synced::Remote(()) => {
                self.note_success(&mut st);
                let mode = self.active_mode(&mut st);
                st.store.apply(mode, LocalChange::Remove(id.clone()));
                (true, None)
            }
            failed_or_skipped => {
                let failed = matches!(failed_or_skipped, Synced::Failed(_));
                if failed {
                    self.note_failure(&mut st);
                }
                let mode = self.active_mode(&mut st);
                let removed = st.store.apply(mode, LocalChange::Remove(id.clone())).is_some();
                let error = failed.then(|| CatalogError::MutationFailed {
                    op: MutationKind::Delete,
                    id: id.clone(),
                });
                (removed, error)
            }
        };

        self.record_error(&mut st, &error);
        self.publish(&st);
        Mutation { value, error }
    }

    // -- favorites ----------------------------------------------------------

    /// Flip the favorite state of `id` and return the resulting state.
    ///
    /// A failed save leaves the state unchanged and sets
    /// [`CatalogError::FavoritesNotSaved`] on the view.
    pub fn toggle_favorite(&self, id: &RecordId) -> bool {
        let mut st = self.state();
        let favorite = match st.favorites.toggle(id) {
            Ok(favorite) => favorite,
            Err(e) => {
                warn!(%id, error = %e, "could not save favorites");
                st.error = Some(CatalogError::FavoritesNotSaved);
                st.favorites.is_favorite(id)
            }
        };
        self.publish(&st);
        favorite
    }

    pub fn is_favorite(&self, id: &RecordId) -> bool {
        self.state().favorites.is_favorite(id)
    }

    // -- reads --------------------------------------------------------------

    /// Find a record by id in memory: visible list, then the current mode's
    /// catalog, then the other catalog.
    pub fn get_record(&self, id: &RecordId) -> Option<Recipe> {
        let st = self.state();
        let mode = st.connectivity.mode().unwrap_or(SourceMode::Remote);
        let found = st.store.get(id, mode).cloned()?;
        Some(self.project_one(&st, found))
    }

    /// The visible list, projected.
    pub fn visible(&self) -> Vec<Recipe> {
        let st = self.state();
        st.favorites.project(st.store.visible())
    }

    /// Statistics over the current mode's catalog, or the visible list when
    /// that catalog is still empty.
    pub fn stats(&self) -> CatalogStats {
        let st = self.state();
        let mode = st.connectivity.mode().unwrap_or(SourceMode::Remote);
        let catalog = st.store.catalog(mode);
        if catalog.is_empty() {
            stats::stats(st.store.visible())
        } else {
            stats::stats(catalog)
        }
    }

    pub fn snapshot(&self) -> CatalogView {
        self.shared.view.borrow().clone()
    }

    /// Receive every published [`CatalogView`].
    pub fn subscribe(&self) -> watch::Receiver<CatalogView> {
        self.shared.view.subscribe()
    }

    // -- internals ----------------------------------------------------------

    fn state(&self) -> MutexGuard<'_, State> {
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, st: &State) {
        self.shared.view.send_replace(CatalogView {
            records: st.favorites.project(st.store.visible()),
            suggestions: st.suggestions.clone(),
            connectivity: st.connectivity,
            loading: st.in_flight > 0,
            error: st.error.clone(),
        });
    }

    fn project_one(&self, st: &State, recipe: Recipe) -> Recipe {
        Recipe {
            is_favorite: st.favorites.is_favorite(&recipe.id),
            ..recipe
        }
    }

    /// Connectivity once no probe is outstanding.
    async fn settled_connectivity(&self) -> Connectivity {
        let _gate = self.shared.probe_gate.lock().await;
        self.state().connectivity
    }

    async fn boundary<T>(&self, call: impl Future<Output = T>) -> T {
        {
            let mut st = self.state();
            st.in_flight += 1;
            self.publish(&st);
        }
        let _in_flight = InFlight(self);
        call.await
    }

    /// Record a remote success. Returns `true` if the mode still targets the
    /// remote source, i.e. the response may be used.
    fn note_success(&self, st: &mut State) -> bool {
        let before = st.connectivity;
        st.connectivity = before.after_success();
        if before != st.connectivity {
            info!(from = %before, to = %st.connectivity, "source mode settled by first response");
        }
        st.connectivity.targets_remote()
    }

    fn note_failure(&self, st: &mut State) {
        let before = st.connectivity;
        st.connectivity = before.after_failure();
        if before != st.connectivity {
            info!(from = %before, to = %st.connectivity, "falling back to local dataset");
        }
    }

    /// The mode mutations apply to. Engages the local catalog in local mode.
    fn active_mode(&self, st: &mut State) -> SourceMode {
        match st.connectivity {
            Connectivity::Settled(SourceMode::LocalFallback) => {
                st.store.engage_local(&self.shared.dataset);
                SourceMode::LocalFallback
            }
            _ => SourceMode::Remote,
        }
    }

    fn record_error(&self, st: &mut State, error: &Option<CatalogError>) {
        if let Some(error) = error {
            st.error = Some(error.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::OfflineSource;

    fn offline() -> SourceOrchestrator {
        SourceOrchestrator::new(Arc::new(OfflineSource))
    }

    #[tokio::test]
    async fn unreachable_source_settles_local_with_records() {
        let orch = offline();
        assert_eq!(orch.initialize().await, SourceMode::LocalFallback);
        let view = orch.snapshot();
        assert_eq!(view.records.len(), 12);
        assert!(view.is_offline());
        assert!(!view.loading);
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn fetch_before_probe_falls_back_to_dataset() {
        let orch = offline();
        let records = orch.fetch_records(&FilterCriteria::default()).await;
        assert_eq!(records.len(), 12);
        assert_eq!(orch.mode(), Some(SourceMode::LocalFallback));
        assert_eq!(orch.snapshot().error, Some(CatalogError::FetchFailed));
    }

    #[tokio::test]
    async fn local_create_uses_clock_ids_without_error() {
        let orch = offline();
        orch.initialize().await;
        let draft = RecipeDraft {
            title: "Toast".to_string(),
            description: "Bread, heated".to_string(),
            image: String::new(),
            category: crate::types::Category::Breakfast,
            difficulty: crate::types::Difficulty::Easy,
            cooking_time: 5,
            servings: 1,
            ingredients: vec!["1 slice bread".to_string()],
            instructions: vec![],
            tags: vec![],
            rating: 3.0,
            author: "me".to_string(),
        };
        let created = orch.create_record(draft).await;
        assert!(created.is_synced());
        assert!(created.value.id.as_str().parse::<i64>().is_ok());
        assert_eq!(orch.visible()[0].title, "Toast");
        assert_eq!(orch.stats().total, 13);
    }

    #[tokio::test]
    async fn short_queries_clear_suggestions() {
        let orch = offline();
        orch.initialize().await;
        assert!(!orch.suggestions_for("ch").await.is_empty());
        assert!(!orch.snapshot().suggestions.is_empty());
        assert!(orch.suggestions_for("c").await.is_empty());
        assert!(orch.snapshot().suggestions.is_empty());
    }

    #[test]
    fn settings_follow_config() {
        let s = Settings::default();
        assert_eq!(s.live_debounce, Duration::from_millis(500));
        assert_eq!(s.suggest_debounce, Duration::from_millis(300));
        assert_eq!(s.suggestions, SuggestionLimits::default());
    }
}
