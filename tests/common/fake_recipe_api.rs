//! Fake recipe REST API for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /`: health probe
//! - `GET /recipes`: listing, filtered by `search`, `category`,
//!   `difficulty` and `maxTime`
//! - `GET|PUT|DELETE /recipes/{id}` and `POST /recipes`
//! - `GET /search/suggestions?q=` and `GET /search/live?q=&limit=`
//!
//! Every request is logged as `"METHOD /path?query"`. The server can be told
//! to answer everything with a fixed status or with an undecodable body.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeRecipeApi::start(catalog()).await.unwrap();
//! let source = HttpSource::new(api.base_url());
//! api.fail_with(Some(500)).await;
//! ```

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pantry_core::filter;
use pantry_core::suggest;
use pantry_core::types::{FilterCriteria, Recipe, RecordId};
use pantry_core::vocabulary::REFERENCE_VOCABULARY;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    records: Vec<Recipe>,
    requests: Vec<String>,
    /// Raw JSON bodies received by POST and PUT, in order.
    bodies: Vec<Value>,
    fail_status: Option<u16>,
    malformed: bool,
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake recipe API server.
pub struct FakeRecipeApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakeRecipeApi {
    /// Start the server seeded with `records`. Returns once it is listening.
    pub async fn start(records: Vec<Recipe>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            records,
            ..ApiState::default()
        }));

        let app = Router::new()
            .route("/", get(root))
            .route("/recipes", get(list_recipes).post(create_recipe))
            .route(
                "/recipes/{id}",
                get(get_recipe).put(update_recipe).delete(delete_recipe),
            )
            .route("/search/suggestions", get(suggestions))
            .route("/search/live", get(live_search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer every request with `status` (or resume normal service).
    pub async fn fail_with(&self, status: Option<u16>) {
        self.state.lock().await.fail_status = status;
    }

    /// Answer every request with 200 and a body that is not JSON.
    pub async fn send_garbage(&self, malformed: bool) {
        self.state.lock().await.malformed = malformed;
    }

    pub async fn requests(&self) -> Vec<String> {
        self.state.lock().await.requests.clone()
    }

    pub async fn bodies(&self) -> Vec<Value> {
        self.state.lock().await.bodies.clone()
    }

    pub async fn records(&self) -> Vec<Recipe> {
        self.state.lock().await.records.clone()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Log the request and apply any configured failure mode.
fn intercept(state: &mut ApiState, method: &Method, uri: &Uri) -> Option<Response> {
    state.requests.push(format!("{method} {uri}"));
    if let Some(status) = state.fail_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Some((status, Json(json!({"detail": "injected failure"}))).into_response());
    }
    if state.malformed {
        return Some((StatusCode::OK, "<html>not json</html>").into_response());
    }
    None
}

fn not_found(id: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": format!("Recipe {id} not found")}))).into_response()
}

async fn root(State(state): State<Shared>, method: Method, uri: Uri) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    Json(json!({"message": "Recipe Search API is running!"})).into_response()
}

async fn list_recipes(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    let mut criteria = FilterCriteria::default();
    if let Some(search) = params.get("search") {
        criteria.search = search.clone();
    }
    if let Some(category) = params.get("category") {
        match category.parse() {
            Ok(category) => criteria.category = category,
            Err(_) => return Json(Vec::<Recipe>::new()).into_response(),
        }
    }
    if let Some(difficulty) = params.get("difficulty") {
        match difficulty.parse() {
            Ok(difficulty) => criteria.difficulty = difficulty,
            Err(_) => return Json(Vec::<Recipe>::new()).into_response(),
        }
    }
    if let Some(max_time) = params.get("maxTime").and_then(|m| m.parse().ok()) {
        criteria.max_time = max_time;
    }
    Json(filter::filter(&st.records, &criteria)).into_response()
}

async fn get_recipe(State(state): State<Shared>, method: Method, uri: Uri, Path(id): Path<String>) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    match st.records.iter().find(|r| r.id.as_str() == id) {
        Some(recipe) => Json(recipe.clone()).into_response(),
        None => not_found(&id),
    }
}

async fn create_recipe(State(state): State<Shared>, method: Method, uri: Uri, Json(body): Json<Value>) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    st.bodies.push(body.clone());
    match serde_json::from_value::<Recipe>(body) {
        Ok(mut recipe) => {
            // The server keeps the client id unless it collides.
            if st.records.iter().any(|r| r.id == recipe.id) {
                recipe.id = RecordId::new(format!("{}-dup", recipe.id));
            }
            st.records.push(recipe.clone());
            Json(recipe).into_response()
        }
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": e.to_string()}))).into_response(),
    }
}

async fn update_recipe(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    st.bodies.push(body.clone());
    let recipe: Recipe = match serde_json::from_value(body) {
        Ok(recipe) => recipe,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": e.to_string()}))).into_response(),
    };
    match st.records.iter_mut().find(|r| r.id.as_str() == id) {
        Some(slot) => {
            *slot = recipe.clone();
            Json(recipe).into_response()
        }
        None => not_found(&id),
    }
}

async fn delete_recipe(State(state): State<Shared>, method: Method, uri: Uri, Path(id): Path<String>) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    match st.records.iter().position(|r| r.id.as_str() == id) {
        Some(index) => {
            let removed = st.records.remove(index);
            Json(json!({"message": format!("Recipe '{}' deleted successfully", removed.title)})).into_response()
        }
        None => not_found(&id),
    }
}

async fn suggestions(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    let q = params.get("q").cloned().unwrap_or_default();
    Json(json!({"suggestions": suggest::suggest(&q, &st.records, REFERENCE_VOCABULARY)})).into_response()
}

async fn live_search(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut st = state.lock().await;
    if let Some(response) = intercept(&mut st, &method, &uri) {
        return response;
    }
    let q = params.get("q").cloned().unwrap_or_default();
    let limit = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);
    let mut hits = filter::filter(&st.records, &FilterCriteria::default().with_search(q));
    hits.truncate(limit);
    Json(hits).into_response()
}
