//! Mock CryptoScan backend for integration tests.
//!
//! Serves the REST surface the panel consumes, with per-endpoint
//! failure injection and request recording so tests can assert what
//! reached the wire.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Shared mutable backend state, inspectable from tests.
#[derive(Default)]
pub struct BackendState {
    /// Current status wire string ("running" / "stopped" / "restarting").
    pub status: Mutex<String>,
    /// Status the backend reports after a successful restart.
    pub post_restart_status: Mutex<Option<String>>,
    pub config: Mutex<BTreeMap<String, String>>,
    pub alerts: Mutex<Vec<Value>>,
    pub watchlist: Mutex<Vec<Value>>,

    pub fail_status: AtomicBool,
    pub fail_start: AtomicBool,
    pub fail_stop: AtomicBool,
    pub fail_restart: AtomicBool,
    pub fail_config_get: AtomicBool,
    pub fail_config_put: AtomicBool,
    pub fail_alerts: AtomicBool,

    pub start_count: AtomicU32,
    pub stop_count: AtomicU32,
    pub restart_count: AtomicU32,
    pub status_poll_count: AtomicU32,
    pub config_put_count: AtomicU32,

    /// Query parameter sets received by GET /api/alerts.
    pub alert_queries: Mutex<Vec<HashMap<String, String>>>,
    /// Last body received by PUT /api/config.
    pub last_config_put: Mutex<Option<BTreeMap<String, String>>>,
}

/// A mock backend HTTP server bound to an ephemeral port.
pub struct MockBackend {
    addr: SocketAddr,
    pub state: Arc<BackendState>,
    shutdown_tx: mpsc::Sender<()>,
}

impl MockBackend {
    /// Start a backend reporting `initial_status`.
    pub async fn start(initial_status: &str) -> Self {
        let state = Arc::new(BackendState::default());
        *state.status.lock() = initial_status.to_string();

        let app = router(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.recv().await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_status(&self, status: &str) {
        *self.state.status.lock() = status.to_string();
    }

    pub fn current_status(&self) -> String {
        self.state.status.lock().clone()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/api/system/status", get(get_status))
        .route("/api/system/start", post(start_system))
        .route("/api/system/stop", post(stop_system))
        .route("/api/system/restart", post(restart_system))
        .route("/api/config", get(get_config).put(put_config))
        .route("/api/alerts", get(get_alerts))
        .route("/api/alerts/count", get(alerts_count))
        .route("/api/alerts/{id}", put(update_alert))
        .route("/api/watchlist", get(get_watchlist).post(add_watchlist))
        .route(
            "/api/watchlist/{id}",
            put(update_watchlist).delete(delete_watchlist),
        )
        .route("/api/watchlist/count", get(watchlist_count))
        .route("/api/ml/stats", get(ml_stats))
        .route("/api/ml/retrain", post(retrain))
        .route("/api/stats", get(system_stats))
        .with_state(state)
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "injected failure"})),
    )
        .into_response()
}

async fn get_status(State(state): State<Arc<BackendState>>) -> Response {
    state.status_poll_count.fetch_add(1, Ordering::SeqCst);
    if state.fail_status.load(Ordering::SeqCst) {
        return failure();
    }
    let status = state.status.lock().clone();
    Json(json!({ "status": status })).into_response()
}

async fn start_system(State(state): State<Arc<BackendState>>) -> Response {
    if state.fail_start.load(Ordering::SeqCst) {
        return failure();
    }
    state.start_count.fetch_add(1, Ordering::SeqCst);
    *state.status.lock() = "running".to_string();
    Json(json!({"status": "ok"})).into_response()
}

async fn stop_system(State(state): State<Arc<BackendState>>) -> Response {
    if state.fail_stop.load(Ordering::SeqCst) {
        return failure();
    }
    state.stop_count.fetch_add(1, Ordering::SeqCst);
    *state.status.lock() = "stopped".to_string();
    Json(json!({"status": "ok"})).into_response()
}

async fn restart_system(State(state): State<Arc<BackendState>>) -> Response {
    if state.fail_restart.load(Ordering::SeqCst) {
        return failure();
    }
    state.restart_count.fetch_add(1, Ordering::SeqCst);
    if let Some(next) = state.post_restart_status.lock().clone() {
        *state.status.lock() = next;
    }
    Json(json!({"status": "ok"})).into_response()
}

async fn get_config(State(state): State<Arc<BackendState>>) -> Response {
    if state.fail_config_get.load(Ordering::SeqCst) {
        return failure();
    }
    Json(state.config.lock().clone()).into_response()
}

async fn put_config(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<BTreeMap<String, String>>,
) -> Response {
    state.config_put_count.fetch_add(1, Ordering::SeqCst);
    if state.fail_config_put.load(Ordering::SeqCst) {
        return failure();
    }
    *state.last_config_put.lock() = Some(body.clone());
    *state.config.lock() = body;
    Json(json!({"status": "ok"})).into_response()
}

async fn get_alerts(
    State(state): State<Arc<BackendState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.alert_queries.lock().push(params);
    if state.fail_alerts.load(Ordering::SeqCst) {
        return failure();
    }
    Json(state.alerts.lock().clone()).into_response()
}

async fn alerts_count(State(state): State<Arc<BackendState>>) -> Response {
    Json(json!({"count": state.alerts.lock().len()})).into_response()
}

async fn update_alert(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> Response {
    let mut alerts = state.alerts.lock();
    match alerts
        .iter_mut()
        .find(|a| a.get("id").and_then(Value::as_i64) == Some(id))
    {
        Some(alert) => {
            if let (Value::Object(alert), Value::Object(patch)) = (alert, patch) {
                for (k, v) in patch {
                    alert.insert(k, v);
                }
            }
            Json(json!({"status": "ok"})).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "no such alert"}))).into_response(),
    }
}

async fn get_watchlist(State(state): State<Arc<BackendState>>) -> Response {
    Json(state.watchlist.lock().clone()).into_response()
}

async fn watchlist_count(State(state): State<Arc<BackendState>>) -> Response {
    Json(json!({"count": state.watchlist.lock().len()})).into_response()
}

async fn add_watchlist(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> Response {
    let mut watchlist = state.watchlist.lock();
    let id = watchlist.len() as i64 + 1;
    let mut entry = body;
    if let Value::Object(map) = &mut entry {
        map.insert("id".to_string(), json!(id));
        map.insert("is_active".to_string(), json!(true));
    }
    watchlist.push(entry);
    Json(json!({"id": id})).into_response()
}

async fn update_watchlist(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> Response {
    let mut watchlist = state.watchlist.lock();
    match watchlist
        .iter_mut()
        .find(|w| w.get("id").and_then(Value::as_i64) == Some(id))
    {
        Some(entry) => {
            if let (Value::Object(entry), Value::Object(patch)) = (entry, patch) {
                for (k, v) in patch {
                    entry.insert(k, v);
                }
            }
            Json(json!({"status": "ok"})).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "no such entry"}))).into_response(),
    }
}

async fn delete_watchlist(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
) -> Response {
    let mut watchlist = state.watchlist.lock();
    let before = watchlist.len();
    watchlist.retain(|w| w.get("id").and_then(Value::as_i64) != Some(id));
    if watchlist.len() == before {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "no such entry"}))).into_response()
    } else {
        Json(json!({"status": "ok"})).into_response()
    }
}

async fn ml_stats() -> Response {
    Json(json!({
        "total_training_data": 1523,
        "model_accuracy": 0.87,
        "last_training": "2026-08-26T03:00:00Z",
        "predictions_today": 42
    }))
    .into_response()
}

async fn retrain() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

async fn system_stats() -> Response {
    Json(json!({
        "uptime": 86400.0,
        "active_connections": 12,
        "processed_trades": 1893021,
        "memory_usage": 512.5,
        "cpu_usage": 23.4
    }))
    .into_response()
}
