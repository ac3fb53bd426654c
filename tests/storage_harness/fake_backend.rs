//! Fake laundry REST backend for exercising `RestDataSource` end to end.
//!
//! # Architecture
//!
//! ```text
//! RestDataSource ──HTTP──▶ axum::serve on 127.0.0.1:0
//!     └─ /api (bearer token required, 401 otherwise)
//!         ├─ POST   /pesanan        → create_order   (wrapped: {"message", "data"})
//!         ├─ GET    /pesanan        → list_orders    (bare list)
//!         ├─ GET    /pesanan/{id}   → get_order      (bare, 404 when absent)
//!         ├─ PUT    /pesanan/{id}   → update_order   (wrapped: {"data"})
//!         ├─ DELETE /pesanan/{id}   → delete_order   (404 when absent)
//!         ├─ GET    /layanan        → list_services  (prices as strings)
//!         ├─ GET    /admin          → list_admins    (wrapped)
//!         └─ GET    /owner/{id}     → get_owner      (bare)
//! ```
//!
//! Storage is an `InMemoryDataSource`, so the backend answers exactly what
//! the in-memory contract suite expects.

use axum::Router;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use laundry::config::ClientConfig;
use laundry::core::order::{CreateOrderRecord, OrderPatch};
use laundry::core::service::DataSource;
use laundry::core::session::{MemorySession, SessionContext};
use laundry::storage::{InMemoryDataSource, RestDataSource};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt::Display;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::{OWNER, TOKEN};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct BackendState {
    pub source: InMemoryDataSource,
    pub token: String,
}

#[derive(Deserialize)]
struct OwnerQuery {
    id_owner: i64,
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} tidak ditemukan", what) })),
    )
        .into_response()
}

fn internal(e: impl Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": e.to_string() })),
    )
        .into_response()
}

async fn require_bearer(State(state): State<BackendState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let supplied = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if supplied != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthenticated." })),
        )
            .into_response();
    }
    next.run(request).await
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn create_order(
    State(state): State<BackendState>,
    Json(record): Json<CreateOrderRecord>,
) -> Response {
    match state.source.create_order(&record).await {
        Ok(order) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Pesanan berhasil dibuat", "data": order })),
        )
            .into_response(),
        Err(e) => internal(e),
    }
}

async fn list_orders(State(state): State<BackendState>, Query(query): Query<OwnerQuery>) -> Response {
    match state.source.list_orders(query.id_owner).await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => internal(e),
    }
}

async fn get_order(State(state): State<BackendState>, Path(id): Path<i64>) -> Response {
    match state.source.get_order(id).await {
        Ok(Some(order)) => Json(order).into_response(),
        Ok(None) => not_found("Pesanan"),
        Err(e) => internal(e),
    }
}

async fn update_order(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    Json(patch): Json<OrderPatch>,
) -> Response {
    match state.source.update_order(id, &patch).await {
        Ok(Some(order)) => Json(json!({ "data": order })).into_response(),
        Ok(None) => not_found("Pesanan"),
        Err(e) => internal(e),
    }
}

async fn delete_order(State(state): State<BackendState>, Path(id): Path<i64>) -> Response {
    match state.source.delete_order(id).await {
        Ok(true) => Json(json!({ "message": "Pesanan dihapus" })).into_response(),
        Ok(false) => not_found("Pesanan"),
        Err(e) => internal(e),
    }
}

/// Prices go out as strings, the way the production backend sends decimals
async fn list_services(
    State(state): State<BackendState>,
    Query(query): Query<OwnerQuery>,
) -> Response {
    let services = match state.source.list_services(query.id_owner).await {
        Ok(services) => services,
        Err(e) => return internal(e),
    };

    let body: Vec<Value> = services
        .into_iter()
        .map(|service| {
            let price = format!("{}.00", service.harga_layanan);
            let mut value = json!(service);
            value["harga_layanan"] = json!(price);
            value
        })
        .collect();
    Json(json!({ "data": body })).into_response()
}

async fn list_admins(State(state): State<BackendState>, Query(query): Query<OwnerQuery>) -> Response {
    match state.source.list_admins(query.id_owner).await {
        Ok(admins) => Json(json!({ "data": admins })).into_response(),
        Err(e) => internal(e),
    }
}

async fn get_owner(State(state): State<BackendState>, Path(id): Path<i64>) -> Response {
    match state.source.get_owner(id).await {
        Ok(Some(owner)) => Json(owner).into_response(),
        Ok(None) => not_found("Owner"),
        Err(e) => internal(e),
    }
}

// ---------------------------------------------------------------------------
// Router and server
// ---------------------------------------------------------------------------

pub fn build_router(state: BackendState) -> Router {
    let api = Router::new()
        .route("/pesanan", get(list_orders).post(create_order))
        .route(
            "/pesanan/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/layanan", get(list_services))
        .route("/admin", get(list_admins))
        .route("/owner/{id}", get(get_owner))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state);

    Router::new().nest("/api", api)
}

/// Serve `router` on an ephemeral port and return its `/api` base URL
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// Client configuration pointing at `base_url`
pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ClientConfig::default()
    }
}

/// A running fake backend and the session its clients use
pub struct FakeBackend {
    pub base_url: String,
    pub source: InMemoryDataSource,
    pub session: Arc<MemorySession>,
}

impl FakeBackend {
    /// Start a backend over `source`, accepting [`TOKEN`] for [`OWNER`]
    pub async fn start(source: InMemoryDataSource) -> Self {
        let state = BackendState {
            source: source.clone(),
            token: TOKEN.to_string(),
        };
        let base_url = serve(build_router(state)).await;

        Self {
            base_url,
            source,
            session: Arc::new(MemorySession::new(TOKEN, OWNER)),
        }
    }

    pub fn config(&self) -> ClientConfig {
        config_for(&self.base_url)
    }

    /// A REST client sharing this backend's session
    pub fn client(&self) -> RestDataSource {
        let session: Arc<dyn SessionContext> = self.session.clone();
        RestDataSource::new(&self.config(), session).unwrap()
    }
}
