//! In-process fake of the catering backend for integration tests.
//!
//! Mirrors the real routes under `/api`, keeps state in memory, issues a
//! fresh uuid token per login, and logs every request as `"METHOD /path"`.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path as UrlPath, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use catering::net::api::ApiClient;
use catering::net::types::{CategorySummary, MenuItem, MenuItemInput, SiteSettings};
use catering::state::session::SessionStore;
use catering::state::storage::FileStorage;
use serde::Deserialize;
use serde_json::{Value, json};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

type Reply<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

#[derive(Default)]
struct Inner {
    items: Vec<MenuItem>,
    settings: SiteSettings,
    tokens: HashSet<String>,
    requests: Vec<String>,
    stall_categories: bool,
}

#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<Inner>>,
}

impl Backend {
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        let backend = Self::default();
        backend.lock().items = items;
        backend
    }

    pub fn items(&self) -> Vec<MenuItem> {
        self.lock().items.clone()
    }

    pub fn settings(&self) -> SiteSettings {
        self.lock().settings.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn count_requests(&self, line: &str) -> usize {
        self.lock().requests.iter().filter(|r| r.as_str() == line).count()
    }

    /// Drop an item behind the client's back.
    pub fn remove_item(&self, id: &str) {
        self.lock().items.retain(|i| i.id != id);
    }

    /// Make `GET /api/menu/categories` hang without answering.
    pub fn stall_categories(&self) {
        self.lock().stall_categories = true;
    }

    /// Forget every issued token, as a server restart or expiry would.
    pub fn revoke_tokens(&self) {
        self.lock().tokens.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        match token {
            Some(token) if self.lock().tokens.contains(token) => Ok(()),
            _ => Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials")),
        }
    }
}

pub fn item(name: &str, category: &str, price: f64, available: bool) -> MenuItem {
    MenuItem {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_owned(),
        description: format!("{name}, house style"),
        price,
        category: category.to_owned(),
        available,
        image_url: None,
    }
}

/// The record the backend keeps for `input` under `id`.
fn stored(id: String, input: MenuItemInput) -> MenuItem {
    MenuItem {
        id,
        name: input.name,
        description: input.description,
        price: input.price,
        category: input.category,
        available: input.available,
        image_url: input.image_url,
    }
}

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

// =============================================================================
// SERVER
// =============================================================================

/// Serve `backend` on an ephemeral local port and return its origin.
pub async fn spawn(backend: Backend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(backend);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Session persisted at `path`, as the CLI builds it.
pub fn session_at(path: &Path) -> Arc<SessionStore> {
    Arc::new(SessionStore::restore(Arc::new(FileStorage::new(path))))
}

pub fn client(base_url: &str, session: &Arc<SessionStore>) -> ApiClient {
    ApiClient::new(base_url, Arc::clone(session), None).unwrap()
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/api/", get(banner))
        .route("/api/menu", get(public_menu))
        .route("/api/menu/categories", get(categories))
        .route("/api/site-settings", get(settings))
        .route("/api/auth/login", post(login))
        .route("/api/admin/menu", get(admin_menu).post(create_item))
        .route("/api/admin/menu/{id}", put(update_item).delete(delete_item))
        .route("/api/admin/site-settings", get(admin_settings).put(update_settings))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

async fn record(State(backend): State<Backend>, request: Request, next: Next) -> Response {
    backend.lock().requests.push(format!("{} {}", request.method(), request.uri().path()));
    next.run(request).await
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn banner() -> Json<Value> {
    Json(json!({ "message": "Catering API is running" }))
}

async fn public_menu(State(backend): State<Backend>) -> Json<Vec<MenuItem>> {
    Json(backend.lock().items.iter().filter(|i| i.available).cloned().collect())
}

async fn categories(State(backend): State<Backend>) -> Json<Vec<CategorySummary>> {
    let stall = backend.lock().stall_categories;
    if stall {
        std::future::pending::<()>().await;
    }
    let mut summaries: Vec<CategorySummary> = Vec::new();
    for item in backend.lock().items.iter().filter(|i| i.available) {
        match summaries.iter_mut().find(|s| s.name == item.category) {
            Some(summary) => summary.count += 1,
            None => summaries.push(CategorySummary { name: item.category.clone(), count: 1 }),
        }
    }
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    Json(summaries)
}

async fn settings(State(backend): State<Backend>) -> Json<SiteSettings> {
    Json(backend.settings())
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login(State(backend): State<Backend>, Json(body): Json<Credentials>) -> Reply<Value> {
    if body.username != ADMIN_USER || body.password != ADMIN_PASSWORD {
        return Err(detail(StatusCode::UNAUTHORIZED, "Incorrect username or password"));
    }
    let token = uuid::Uuid::new_v4().to_string();
    backend.lock().tokens.insert(token.clone());
    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

async fn admin_menu(State(backend): State<Backend>, headers: HeaderMap) -> Reply<Vec<MenuItem>> {
    backend.authorize(&headers)?;
    Ok(Json(backend.items()))
}

async fn create_item(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(input): Json<MenuItemInput>,
) -> Reply<MenuItem> {
    backend.authorize(&headers)?;
    let created = stored(uuid::Uuid::new_v4().to_string(), input);
    backend.lock().items.push(created.clone());
    Ok(Json(created))
}

async fn update_item(
    State(backend): State<Backend>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
    Json(input): Json<MenuItemInput>,
) -> Reply<MenuItem> {
    backend.authorize(&headers)?;
    let mut inner = backend.lock();
    let Some(existing) = inner.items.iter_mut().find(|i| i.id == id) else {
        return Err(detail(StatusCode::NOT_FOUND, "Menu item not found"));
    };
    *existing = stored(id, input);
    Ok(Json(existing.clone()))
}

async fn delete_item(
    State(backend): State<Backend>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Reply<Value> {
    backend.authorize(&headers)?;
    let mut inner = backend.lock();
    let before = inner.items.len();
    inner.items.retain(|i| i.id != id);
    if inner.items.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "Menu item not found"));
    }
    Ok(Json(json!({ "message": "Menu item deleted successfully" })))
}

async fn admin_settings(State(backend): State<Backend>, headers: HeaderMap) -> Reply<SiteSettings> {
    backend.authorize(&headers)?;
    Ok(Json(backend.settings()))
}

async fn update_settings(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(settings): Json<SiteSettings>,
) -> Reply<SiteSettings> {
    backend.authorize(&headers)?;
    backend.lock().settings = settings.clone();
    Ok(Json(settings))
}
