//! In-memory record source for testing.

use async_trait::async_trait;
use chrono::Utc;
use pantry_core::error::SourceError;
use pantry_core::filter;
use pantry_core::source::{RecordSource, SourceResult};
use pantry_core::suggest;
use pantry_core::types::{FilterCriteria, RecipeDraft, Recipe, RecipePatch, RecordId};
use pantry_core::vocabulary::REFERENCE_VOCABULARY;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::RwLock;

/// Boundary operations, for fault injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Probe,
    List,
    Get,
    Create,
    Update,
    Delete,
    Suggest,
    LiveSearch,
}

/// In-memory record source for testing.
///
/// Records live in a `Vec` behind a [`RwLock`], so every trait method works
/// on `&self`. The source can be switched offline as a whole, made to fail
/// single operations, and told to delay individual queries so responses
/// resolve out of order. Server-assigned ids are `srv-1`, `srv-2`, ...
///
/// Delays use `tokio::time::sleep` and therefore follow a paused test clock.
pub struct MemorySource {
    name: String,
    records: RwLock<Vec<Recipe>>,
    online: AtomicBool,
    failing: Mutex<HashSet<Operation>>,
    delays: Mutex<HashMap<String, Duration>>,
    default_delay: Mutex<Duration>,
    calls: Mutex<HashMap<Operation, usize>>,
    next_id: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<Recipe>) -> Self {
        Self {
            name: "memory".to_string(),
            records: RwLock::new(records),
            online: AtomicBool::new(true),
            failing: Mutex::new(HashSet::new()),
            delays: Mutex::new(HashMap::new()),
            default_delay: Mutex::new(Duration::ZERO),
            calls: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    /// A source that refuses everything, including the probe.
    pub fn offline() -> Self {
        let source = Self::new();
        source.set_online(false);
        source
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Make `op` fail (or succeed again) while the source stays online.
    pub fn fail(&self, op: Operation, failing: bool) {
        let mut set = lock(&self.failing);
        if failing {
            set.insert(op);
        } else {
            set.remove(&op);
        }
    }

    /// Delay list and live-search responses whose query is `query`.
    ///
    /// For `list` the query is the criteria's search string.
    pub fn delay_query(&self, query: impl Into<String>, delay: Duration) {
        lock(&self.delays).insert(query.into(), delay);
    }

    /// Delay every call without a query-specific delay.
    pub fn delay_all(&self, delay: Duration) {
        *lock(&self.default_delay) = delay;
    }

    /// Number of calls made for `op` so far, failed ones included.
    pub fn calls(&self, op: Operation) -> usize {
        lock(&self.calls).get(&op).copied().unwrap_or(0)
    }

    pub async fn records(&self) -> Vec<Recipe> {
        self.records.read().await.clone()
    }

    pub async fn insert(&self, recipe: Recipe) {
        self.records.write().await.push(recipe);
    }

    async fn enter(&self, op: Operation, query: Option<&str>) -> SourceResult<()> {
        *lock(&self.calls).entry(op).or_insert(0) += 1;

        let delay = query
            .and_then(|q| lock(&self.delays).get(q).copied())
            .unwrap_or_else(|| *lock(&self.default_delay));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if !self.online.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("memory source offline".to_string()));
        }
        if lock(&self.failing).contains(&op) {
            return Err(SourceError::Status { status: 500 });
        }
        Ok(())
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl RecordSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn probe(&self) -> bool {
        self.enter(Operation::Probe, None).await.is_ok()
    }

    async fn list(&self, criteria: Option<&FilterCriteria>) -> SourceResult<Vec<Recipe>> {
        self.enter(Operation::List, criteria.map(|c| c.search.as_str())).await?;
        let records = self.records.read().await;
        Ok(match criteria {
            Some(criteria) => filter::filter(&records, criteria),
            None => records.clone(),
        })
    }

    async fn get(&self, id: &RecordId) -> SourceResult<Recipe> {
        self.enter(Operation::Get, None).await?;
        self.records
            .read()
            .await
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.clone()))
    }

    async fn create(&self, draft: &RecipeDraft) -> SourceResult<Recipe> {
        self.enter(Operation::Create, None).await?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let recipe = draft.clone().into_recipe(RecordId::new(format!("srv-{n}")), Utc::now());
        self.records.write().await.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: &RecordId, patch: &RecipePatch) -> SourceResult<Recipe> {
        self.enter(Operation::Update, None).await?;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| SourceError::NotFound(id.clone()))?;
        patch.apply_to(slot);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &RecordId) -> SourceResult<()> {
        self.enter(Operation::Delete, None).await?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Err(SourceError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn suggest(&self, query: &str) -> SourceResult<Vec<String>> {
        self.enter(Operation::Suggest, Some(query)).await?;
        let records = self.records.read().await;
        Ok(suggest::suggest(query, &records, REFERENCE_VOCABULARY))
    }

    async fn live_search(&self, query: &str, limit: usize) -> SourceResult<Vec<Recipe>> {
        self.enter(Operation::LiveSearch, Some(query)).await?;
        let records = self.records.read().await;
        let mut hits = filter::filter(&records, &FilterCriteria::default().with_search(query));
        hits.truncate(limit);
        Ok(hits)
    }
}
