//! Integration tests for Tavola.
//!
//! Every test runs against real sockets on loopback: a [`FakeBackend`]
//! stands in for the operations API, and a [`TestConsole`] serves the
//! console router against it. Nothing external is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tavola-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `connectivity` - Health probing against reachable and unreachable backends
//! - `session` - Demo/credential login, restore and logout
//! - `signup` - Join-key checks and staff registration
//! - `demo_fallback` - Pages falling back to demo data

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tavola_console::config::{ConsoleConfig, parse_api_url};
use tavola_console::state::AppState;
use rust_decimal::Decimal;
use tavola_core::demo;
use tavola_core::{JoinKeyKind, StaticJoinKeys};
use tokio::net::TcpListener;
use url::Url;

/// Credentials the fake backend accepts.
pub const VALID_EMAIL: &str = "elena@mykonos-mediterranean.com";
pub const VALID_PASSWORD: &str = "correct-horse-battery";
/// Token issued for [`VALID_EMAIL`].
pub const ISSUED_TOKEN: &str = "live-token-elena";
/// Email the fake backend reports as already registered.
pub const TAKEN_EMAIL: &str = "nikos@mykonos-mediterranean.com";
/// Name of the single item the fake backend serves as live inventory.
pub const LIVE_ITEM_NAME: &str = "Saffron Threads";

/// Closed loopback port: connections are refused immediately.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// How `GET /health` answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthMode {
    /// 200 `{"status":"healthy"}`
    #[default]
    Healthy,
    /// 503 `{"status":"unhealthy"}`
    Unavailable,
    /// 200 `{"status":"degraded"}`
    Degraded,
    /// 200 with a plain-text body
    NotJson,
    /// Healthy, but only after the given delay
    Slow(Duration),
}

/// Switches that shape the fake backend's answers.
#[derive(Debug, Default)]
pub struct Behavior {
    health: Mutex<HealthMode>,
    data_fails: AtomicBool,
    huge_amounts: AtomicBool,
    data_requests: AtomicUsize,
}

/// An in-process operations API on an ephemeral port.
pub struct FakeBackend {
    addr: SocketAddr,
    behavior: Arc<Behavior>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let behavior = Arc::new(Behavior::default());
        let router = Router::new()
            .route("/health", get(health))
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/join-keys/validate", post(validate_join_key))
            .route("/inventory/items", get(inventory_items))
            .route("/staff/employees", get(empty_list))
            .route("/payroll/runs", get(empty_list))
            .route("/expenses", get(empty_list))
            .with_state(Arc::clone(&behavior));

        let addr = serve(router).await;
        Self { addr, behavior }
    }

    pub fn url(&self) -> Url {
        parse_api_url(&format!("http://{}", self.addr)).unwrap()
    }

    /// Make `/health` report healthy, or unhealthy with a 503.
    pub fn set_healthy(&self, healthy: bool) {
        self.set_health(if healthy {
            HealthMode::Healthy
        } else {
            HealthMode::Unavailable
        });
    }

    pub fn set_health(&self, mode: HealthMode) {
        *self.behavior.health.lock().unwrap() = mode;
    }

    /// Serve inventory whose stock value does not fit in a `Decimal`.
    pub fn set_huge_amounts(&self, huge: bool) {
        self.behavior.huge_amounts.store(huge, Ordering::SeqCst);
    }

    /// Make every data endpoint answer 500 while health stays as configured.
    pub fn set_data_fails(&self, fails: bool) {
        self.behavior.data_fails.store(fails, Ordering::SeqCst);
    }

    /// Number of data endpoint calls received so far.
    pub fn data_requests(&self) -> usize {
        self.behavior.data_requests.load(Ordering::SeqCst)
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn health(State(behavior): State<Arc<Behavior>>) -> Response {
    let mode = *behavior.health.lock().unwrap();
    match mode {
        HealthMode::Healthy => Json(json!({"status": "healthy"})).into_response(),
        HealthMode::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "unhealthy"})),
        )
            .into_response(),
        HealthMode::Degraded => Json(json!({"status": "degraded"})).into_response(),
        HealthMode::NotJson => "OK".into_response(),
        HealthMode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({"status": "healthy"})).into_response()
        }
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    if form.username == VALID_EMAIL && form.password == VALID_PASSWORD {
        Json(json!({"access_token": ISSUED_TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect email or password"})),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<serde_json::Value>) -> Response {
    if body.get("email").and_then(serde_json::Value::as_str) == Some(TAKEN_EMAIL) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Email already registered"})),
        )
            .into_response()
    } else {
        (StatusCode::CREATED, Json(json!({"id": "usr-1"}))).into_response()
    }
}

#[derive(Deserialize)]
struct JoinKeyBody {
    kind: JoinKeyKind,
    key: String,
}

async fn validate_join_key(Json(body): Json<JoinKeyBody>) -> Json<serde_json::Value> {
    let outcome = StaticJoinKeys::default().check(body.kind, &body.key);
    Json(json!({
        "valid": outcome.is_valid(),
        "owner_name": outcome.owner_name(),
    }))
}

async fn inventory_items(State(behavior): State<Arc<Behavior>>) -> Response {
    behavior.data_requests.fetch_add(1, Ordering::SeqCst);
    if behavior.data_fails.load(Ordering::SeqCst) {
        return data_failure();
    }

    let mut item = demo::inventory_items().first().cloned().unwrap();
    item.name = LIVE_ITEM_NAME.to_owned();
    if behavior.huge_amounts.load(Ordering::SeqCst) {
        // 1e16 × 1e16 is past Decimal::MAX (~7.9e28)
        item.quantity = Decimal::new(10_000_000_000_000_000, 0);
        item.unit_cost = Decimal::new(10_000_000_000_000_000, 0);
    }
    Json(vec![item]).into_response()
}

async fn empty_list(State(behavior): State<Arc<Behavior>>) -> Response {
    behavior.data_requests.fetch_add(1, Ordering::SeqCst);
    if behavior.data_fails.load(Ordering::SeqCst) {
        return data_failure();
    }
    Json(Vec::<serde_json::Value>::new()).into_response()
}

fn data_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "database unavailable"})),
    )
        .into_response()
}

/// The console served on an ephemeral port.
pub struct TestConsole {
    base_url: String,
    /// Cookie-carrying client that does not follow redirects.
    pub client: reqwest::Client,
}

impl TestConsole {
    /// Serve the console against the operations API at `api_url`.
    pub async fn start(api_url: Url) -> Self {
        let state = AppState::new(ConsoleConfig::local(api_url));
        let addr = serve(tavola_console::app(state)).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Start a demo session for `role` (a `Role` string form).
    pub async fn demo_login(&self, role: &str) {
        let resp = self.post_form("/auth/demo", &[("role", role)]).await;
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER, "demo login should redirect");
    }
}

/// `Location` header of a redirect response.
pub fn location(resp: &reqwest::Response) -> Option<&str> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
