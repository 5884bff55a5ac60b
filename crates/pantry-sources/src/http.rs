//! HTTP record source speaking the recipe REST API.
//!
//! # Endpoints
//!
//! | call          | request                                   | response              |
//! |---------------|-------------------------------------------|-----------------------|
//! | `probe`       | `GET /`                                   | any 2xx               |
//! | `list`        | `GET /recipes?search&category&difficulty&maxTime` | `Recipe[]`    |
//! | `get`         | `GET /recipes/{id}`                       | `Recipe`              |
//! | `create`      | `POST /recipes`                           | `Recipe`              |
//! | `update`      | `GET` then `PUT /recipes/{id}`            | `Recipe`              |
//! | `delete`      | `DELETE /recipes/{id}`                    | `{"message": ...}`    |
//! | `suggest`     | `GET /search/suggestions?q=`              | `{"suggestions": []}` |
//! | `live_search` | `GET /search/live?q=&limit=`              | `Recipe[]`            |
//!
//! Every request is bounded by the configured timeout. Transport errors,
//! non-2xx statuses, timeouts and undecodable bodies all map to
//! [`SourceError`].

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http_body_util::{BodyExt, Full};
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use pantry_core::config::SourceConfig;
use pantry_core::error::SourceError;
use pantry_core::source::{RecordSource, SourceResult};
use pantry_core::types::{CategoryFilter, DifficultyFilter, FilterCriteria, RecipeDraft, Recipe, RecipePatch, RecordId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Record source backed by the recipe REST API.
#[derive(Clone)]
pub struct HttpSource {
    name: String,
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
    timeout: Duration,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            name: format!("http({base_url})"),
            base_url,
            client: Client::builder(TokioExecutor::new()).build_http(),
            timeout,
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::with_timeout(&config.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> SourceResult<Bytes> {
        let uri = format!("{}{}", self.base_url, path);
        debug!(%method, %uri, "request");

        let mut builder = Request::builder().method(method).uri(&uri).header(ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(Full::new(Bytes::from(body.unwrap_or_default())))
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))?
    }

    async fn exchange(&self, request: Request<Full<Bytes>>) -> SourceResult<Bytes> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?
            .to_bytes();
        if !status.is_success() {
            return Err(SourceError::Status { status: status.as_u16() });
        }
        Ok(body)
    }

    async fn json<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> SourceResult<T> {
        let bytes = self.send(method, path, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

fn encode<T: Serialize>(value: &T) -> SourceResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SourceError::Malformed(e.to_string()))
}

fn not_found_as(id: &RecordId, err: SourceError) -> SourceError {
    match err {
        SourceError::Status { status } if status == StatusCode::NOT_FOUND.as_u16() => SourceError::NotFound(id.clone()),
        other => other,
    }
}

fn record_path(id: &RecordId) -> String {
    format!("/recipes/{}", urlencoding::encode(id.as_str()))
}

fn query_string(params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect();
    format!("?{}", pairs.join("&"))
}

/// `/recipes` query parameters. Sentinel selectors and an empty search are
/// left out; the time bound is always sent, zero included.
fn listing_query(criteria: &FilterCriteria) -> String {
    let mut params = Vec::new();
    if !criteria.search.is_empty() {
        params.push(("search", criteria.search.clone()));
    }
    if let CategoryFilter::Only(category) = criteria.category {
        params.push(("category", category.to_string()));
    }
    if let DifficultyFilter::Only(difficulty) = criteria.difficulty {
        params.push(("difficulty", difficulty.to_string()));
    }
    params.push(("maxTime", criteria.max_time.to_string()));
    query_string(&params)
}

/// POST body: the draft plus a client-proposed id and creation time.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRecipe<'a> {
    id: String,
    #[serde(flatten)]
    draft: &'a RecipeDraft,
    #[serde(with = "pantry_core::wire::timestamp")]
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SuggestionsBody {
    suggestions: Vec<String>,
}

#[async_trait]
impl RecordSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn probe(&self) -> bool {
        match self.send(Method::GET, "/", None).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "probe failed");
                false
            }
        }
    }

    async fn list(&self, criteria: Option<&FilterCriteria>) -> SourceResult<Vec<Recipe>> {
        let query = criteria.map(listing_query).unwrap_or_default();
        self.json(Method::GET, &format!("/recipes{query}"), None).await
    }

    async fn get(&self, id: &RecordId) -> SourceResult<Recipe> {
        self.json(Method::GET, &record_path(id), None)
            .await
            .map_err(|e| not_found_as(id, e))
    }

    async fn create(&self, draft: &RecipeDraft) -> SourceResult<Recipe> {
        let now = Utc::now();
        let body = encode(&NewRecipe {
            id: now.timestamp_millis().to_string(),
            draft,
            created_at: now,
        })?;
        self.json(Method::POST, "/recipes", Some(body)).await
    }

    async fn update(&self, id: &RecordId, patch: &RecipePatch) -> SourceResult<Recipe> {
        let mut current = self.get(id).await?;
        patch.apply_to(&mut current);
        let body = encode(&current)?;
        self.json(Method::PUT, &record_path(id), Some(body))
            .await
            .map_err(|e| not_found_as(id, e))
    }

    async fn delete(&self, id: &RecordId) -> SourceResult<()> {
        self.send(Method::DELETE, &record_path(id), None)
            .await
            .map(|_| ())
            .map_err(|e| not_found_as(id, e))
    }

    async fn suggest(&self, query: &str) -> SourceResult<Vec<String>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let path = format!("/search/suggestions{}", query_string(&[("q", query.to_string())]));
        let body: SuggestionsBody = self.json(Method::GET, &path, None).await?;
        Ok(body.suggestions)
    }

    async fn live_search(&self, query: &str, limit: usize) -> SourceResult<Vec<Recipe>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let params = [("q", query.to_string()), ("limit", limit.to_string())];
        self.json(Method::GET, &format!("/search/live{}", query_string(&params)), None)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::types::{Category, Difficulty};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(FilterCriteria::default(), "?maxTime=180")]
    #[case::zero_bound(FilterCriteria::default().with_max_time(0), "?maxTime=0")]
    #[case::search(FilterCriteria::default().with_search("pad thai"), "?search=pad%20thai&maxTime=180")]
    #[case::everything(
        FilterCriteria::default()
            .with_search("mac & cheese")
            .with_category(CategoryFilter::Only(Category::MainCourse))
            .with_difficulty(DifficultyFilter::Only(Difficulty::Easy))
            .with_max_time(30),
        "?search=mac%20%26%20cheese&category=Main%20Course&difficulty=Easy&maxTime=30"
    )]
    fn listing_query_omits_sentinels(#[case] criteria: FilterCriteria, #[case] expected: &str) {
        assert_eq!(listing_query(&criteria), expected);
    }

    #[test]
    fn record_paths_escape_ids() {
        assert_eq!(record_path(&RecordId::from("a/b")), "/recipes/a%2Fb");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(HttpSource::new("http://localhost:8000/").base_url(), "http://localhost:8000");
    }

    #[test]
    fn from_config_uses_the_configured_endpoint() {
        let config = SourceConfig {
            base_url: "http://recipes.internal:9000/".to_string(),
            request_timeout_ms: 250,
        };
        let source = HttpSource::from_config(&config);
        assert_eq!(source.base_url(), "http://recipes.internal:9000");
        assert_eq!(source.timeout, Duration::from_millis(250));
    }

    #[test]
    fn create_body_flattens_the_draft() {
        let draft = RecipeDraft {
            title: "Soup".to_string(),
            description: String::new(),
            image: String::new(),
            category: Category::Soup,
            difficulty: Difficulty::Easy,
            cooking_time: 15,
            servings: 2,
            ingredients: vec![],
            instructions: vec![],
            tags: vec![],
            rating: 0.0,
            author: "me".to_string(),
        };
        let body = NewRecipe {
            id: "42".to_string(),
            draft: &draft,
            created_at: DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap().with_timezone(&Utc),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["cookingTime"], 15);
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05.000Z");
        assert!(json.get("isFavorite").is_none());
    }

    #[tokio::test]
    async fn unreachable_host_fails_the_probe() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let source = HttpSource::with_timeout("http://127.0.0.1:9", Duration::from_millis(500));
        assert!(!source.probe().await);
        assert!(source.list(None).await.is_err());
    }
}
