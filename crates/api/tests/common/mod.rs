//! Shared helpers for the API integration tests.
//!
//! The router under test is built with [`build_app_router`], so requests go
//! through the same middleware stack production uses. Saved cities live in
//! an in-process [`MemoryStore`]; the scoring service is a small axum app
//! bound to an ephemeral local port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::get as route_get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use cityspire_api::auth::jwt::{generate_access_token, JwtConfig};
use cityspire_api::config::ServerConfig;
use cityspire_api::router::build_app_router;
use cityspire_api::state::AppState;
use cityspire_core::city_lookup::CityLookup;
use cityspire_core::types::DbId;
use cityspire_db::models::profile::OwnerRef;
use cityspire_db::models::saved_city::{CreateSavedCity, SavedCity, SavedCitySummary};
use cityspire_db::store::SavedCityStore;
use cityspire_ds::{DsClient, DsConfig};

pub const TEST_ORIGIN: &str = "http://localhost:3000";

// ---------------------------------------------------------------------------
// Config / auth
// ---------------------------------------------------------------------------

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough".to_string(),
        issuer: None,
        audience: None,
    }
}

/// Build a test `ServerConfig` pointing the scoring client at `ds_url`.
pub fn test_config(ds_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        jwt: jwt_config(),
        ds: DsConfig {
            base_url: ds_url.to_string(),
            api_token: None,
            timeout: Duration::from_secs(1),
        },
        city_lookup_path: "unused.json".into(),
    }
}

/// A valid bearer token for `user_id`.
pub fn token_for(user_id: &str) -> String {
    generate_access_token(user_id, None, 15, &jwt_config()).expect("token generation")
}

pub fn test_cities() -> CityLookup {
    CityLookup::from_entries([
        (5760, "Port Charlotte, Florida"),
        (42, "Austin, Texas"),
        (77, "Sarasota, Florida"),
    ])
    .expect("valid test cities")
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// [`SavedCityStore`] double backed by a `Vec`.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<SavedCity>>,
    next_id: AtomicI64,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Snapshot of every stored row.
    pub fn rows(&self) -> Vec<SavedCity> {
        self.rows.lock().unwrap().clone()
    }

    /// Insert a row directly, bypassing the HTTP layer.
    pub fn seed(&self, owner: &str, name: &str, city_id: &str) -> SavedCity {
        let city = SavedCity {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_string(),
            city_id: city_id.to_string(),
            user_id: owner.to_string(),
        };
        self.rows.lock().unwrap().push(city.clone());
        city
    }

    /// Make every subsequent call fail as if the database were down.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl SavedCityStore for MemoryStore {
    async fn create(
        &self,
        owner: &OwnerRef,
        input: &CreateSavedCity,
    ) -> Result<SavedCity, sqlx::Error> {
        self.check()?;
        Ok(self.seed(&owner.id, &input.name, &input.city_id))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<SavedCitySummary>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows()
            .into_iter()
            .filter(|c| c.user_id == owner_id)
            .map(SavedCitySummary::from)
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<SavedCity>, sqlx::Error> {
        self.check()?;
        Ok(self.rows().into_iter().find(|c| c.id == id))
    }

    async fn remove(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        self.check()
    }
}

// ---------------------------------------------------------------------------
// Fake scoring service
// ---------------------------------------------------------------------------

type Hits = Arc<AtomicUsize>;

async fn fake_predict(
    State(hits): State<Hits>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    hits.fetch_add(1, Ordering::SeqCst);
    let id_num = match q.get("city_state").map(String::as_str) {
        Some("Port Charlotte, Florida") => json!(5760),
        Some("Austin, Texas") => json!(42),
        // Float-typed ids, as a dataframe-backed service writes them.
        Some("Sarasota, Florida") => json!(77.0),
        // Known to the service but missing from the lookup table.
        Some("Ghost Town, Nevada") => json!(999),
        _ => return Err((StatusCode::NOT_FOUND, "city not found")),
    };
    Ok(Json(json!({
        "id_num": id_num,
        "population": 62348,
        "crime_rate": 30.31,
        "rental_rate": 1799.74,
        "walk_score": 17,
    })))
}

async fn fake_recommend(
    State(hits): State<Hits>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        { "id_num": 5760, "walk_score": 17, "query": q },
        { "id_num": 42.0, "walk_score": 40, "query": q },
        { "walk_score": 55, "query": q },
    ]))
}

async fn fake_state_id(
    State(hits): State<Hits>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "city_state": q.get("city_state") }))
}

/// Sleeps longer than any test timeout when `state` is `SLOW`.
async fn fake_viz(State(hits): State<Hits>, Path(state): Path<String>) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    if state == "SLOW" {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    Json(json!({ "state": state, "data": [{ "type": "bar" }] }))
}

/// Serve the fake scoring service; returns its base URL and request counter.
pub async fn spawn_upstream() -> (String, Hits) {
    let hits: Hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/predict", route_get(fake_predict))
        .route("/recommend", route_get(fake_recommend))
        .route("/state_id", route_get(fake_state_id))
        .route("/viz/{state}", route_get(fake_viz))
        .with_state(Arc::clone(&hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}

/// A base URL on which nothing is listening.
pub async fn unreachable_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Router plus handles on its collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub upstream_hits: Hits,
}

/// Build the app against a live fake scoring service.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Like [`spawn_app`], letting the caller adjust the config first.
pub async fn spawn_app_with(configure: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let (url, hits) = spawn_upstream().await;
    let mut config = test_config(&url);
    configure(&mut config);
    build_test_app(config, hits)
}

/// Build the app against a scoring service URL that refuses connections.
pub async fn spawn_app_without_upstream() -> TestApp {
    let url = unreachable_upstream().await;
    build_test_app(test_config(&url), Arc::new(AtomicUsize::new(0)))
}

fn build_test_app(config: ServerConfig, upstream_hits: Hits) -> TestApp {
    let store = Arc::new(MemoryStore::default());

    let state = AppState {
        store: Arc::clone(&store) as Arc<dyn SavedCityStore>,
        ds: Arc::new(DsClient::new(&config.ds).expect("test ds client")),
        cities: Arc::new(test_cities()),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        upstream_hits,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with an optional bearer token for `user`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("authorization", format!("Bearer {}", token_for(user)));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, user: Option<&str>) -> Response {
    send(app, Method::GET, uri, user, None).await
}

pub async fn post_json(app: &Router, uri: &str, user: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, uri, user, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, user: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, user, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
