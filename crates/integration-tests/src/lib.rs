//! Integration test harness for the PartsGrid client SDK.
//!
//! Spins up an in-process mock of the marketplace REST API on an
//! ephemeral port and hands tests a fully wired client (config, jar,
//! `ApiClient`) pointed at it.
//!
//! The mock speaks the real envelope (`{success, message, data}`), issues
//! real three-segment JWTs from `/auth/login`, requires a bearer token on
//! the authenticated routes, and records every `Authorization` header it
//! sees so tests can assert on the wire, not just on return values.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde_json::{Value, json};
use url::Url;

use partsgrid_client::api::ApiClient;
use partsgrid_client::config::ClientConfig;
use partsgrid_client::cookies::{CookieJar, SharedJar};

/// Dealer id baked into issued tokens and `/dealers/me`.
pub const DEALER_ID: i64 = 7;

/// User id baked into issued tokens.
pub const USER_ID: i64 = 101;

// =============================================================================
// Token minting
// =============================================================================

/// Mint an unsigned-but-well-formed JWT from arbitrary claims.
#[must_use]
pub fn mint_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).expect("claims serialize"));
    format!("{header}.{payload}.signature")
}

/// Mint the standard test token expiring `seconds_from_now` from now.
#[must_use]
pub fn token_expiring_in(seconds_from_now: i64) -> String {
    mint_token(&json!({
        "id": USER_ID,
        "dealerId": DEALER_ID,
        "role": "Dealer",
        "exp": Utc::now().timestamp() + seconds_from_now,
        "iat": Utc::now().timestamp(),
    }))
}

// =============================================================================
// Mock backend
// =============================================================================

/// What the mock observed, shared with tests.
#[derive(Clone, Default)]
pub struct Observed {
    /// `Authorization` header (or `None`) per request, in arrival order.
    pub auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    /// How many times the pincode route actually ran.
    pub pincode_hits: Arc<AtomicUsize>,
}

impl Observed {
    fn record_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        self.auth_headers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(value);
    }

    /// Snapshot of the recorded `Authorization` headers.
    #[must_use]
    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth_headers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

/// The running mock plus everything a test needs to talk to it.
pub struct TestContext {
    pub addr: SocketAddr,
    pub observed: Observed,
    pub jar: SharedJar,
    pub client: ApiClient,
    pub config: ClientConfig,
}

impl TestContext {
    /// Spawn the mock backend and wire a client at it, with the default
    /// 45 s timeout.
    ///
    /// # Panics
    ///
    /// Panics when the ephemeral listener or client cannot be created -
    /// which fails the calling test, as intended.
    pub async fn start() -> Self {
        Self::spawn(None).await
    }

    /// Like [`start`](Self::start) but with an explicit request timeout,
    /// for tests exercising the ceiling.
    pub async fn start_with_timeout(timeout: Duration) -> Self {
        Self::spawn(Some(timeout)).await
    }

    async fn spawn(timeout: Option<Duration>) -> Self {
        let observed = Observed::default();
        let app = router(observed.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(axum::serve(listener, app).into_future());

        let base = Url::parse(&format!("http://{addr}/api/v1")).expect("base url");
        let mut config = ClientConfig::for_base_url(base);
        if let Some(timeout) = timeout {
            config = config.with_request_timeout(timeout);
        }
        let jar = CookieJar::shared();
        let client = ApiClient::new(&config, jar.clone()).expect("client");

        Self {
            addr,
            observed,
            jar,
            client,
            config,
        }
    }
}

fn router(observed: Observed) -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(acknowledge))
        .route("/api/v1/auth/profile", get(profile))
        .route("/api/v1/orders", get(orders))
        .route("/api/v1/orders/{id}/cancel", post(cancel_order))
        .route("/api/v1/dealers/me", get(dealer_me))
        .route("/api/v1/dealers/statistics", get(statistics_down))
        .route("/api/v1/pincodes/{pincode}", get(pincode))
        .route("/api/v1/hang", get(hang))
        .route("/api/v1/broken", get(broken))
        .with_state(observed)
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({"success": true, "message": "ok", "data": data}))
}

fn rejection(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({"success": false, "message": message})),
    )
        .into_response()
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

async fn login(State(observed): State<Observed>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    observed.record_auth(&headers);
    if body.get("email").and_then(Value::as_str).is_none() {
        return rejection(StatusCode::BAD_REQUEST, "email is required");
    }
    if body.get("password").and_then(Value::as_str) == Some("wrong") {
        return rejection(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    envelope(json!({"token": token_expiring_in(3600)})).into_response()
}

async fn acknowledge(State(observed): State<Observed>, headers: HeaderMap) -> Response {
    observed.record_auth(&headers);
    Json(json!({"success": true, "message": "ok"})).into_response()
}

async fn profile(State(observed): State<Observed>, headers: HeaderMap) -> Response {
    observed.record_auth(&headers);
    if bearer_of(&headers).is_none() {
        return rejection(StatusCode::UNAUTHORIZED, "Session expired");
    }
    envelope(json!({
        "id": USER_ID,
        "name": "Asha Dealer",
        "email": "dealer@example.com",
        "role": "Dealer",
        "dealerId": DEALER_ID,
    }))
    .into_response()
}

async fn orders(State(observed): State<Observed>, headers: HeaderMap) -> Response {
    observed.record_auth(&headers);
    if bearer_of(&headers).is_none() {
        return rejection(StatusCode::UNAUTHORIZED, "Session expired");
    }
    envelope(json!({
        "items": [{
            "id": 9001,
            "status": "PLACED",
            "placedAt": "2026-07-01T10:15:00Z",
            "items": [{
                "productId": 55,
                "name": "Brake pad set",
                "quantity": 2,
                "unitPrice": {"amount": "1499.00", "currencyCode": "INR"},
            }],
            "total": {"amount": "2998.00", "currencyCode": "INR"},
            "dealerId": DEALER_ID,
        }],
        "pagination": {"page": 1, "per_page": 20, "total": 1, "total_pages": 1},
    }))
    .into_response()
}

async fn cancel_order(
    State(observed): State<Observed>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    observed.record_auth(&headers);
    if bearer_of(&headers).is_none() {
        return rejection(StatusCode::UNAUTHORIZED, "Session expired");
    }
    if id == 9999 {
        return rejection(StatusCode::CONFLICT, "Order already shipped");
    }
    envelope(json!({
        "id": id,
        "status": "CANCELLED",
        "placedAt": "2026-07-01T10:15:00Z",
        "items": [],
        "total": {"amount": "0", "currencyCode": "INR"},
    }))
    .into_response()
}

async fn dealer_me(State(observed): State<Observed>, headers: HeaderMap) -> Response {
    observed.record_auth(&headers);
    if bearer_of(&headers).is_none() {
        return rejection(StatusCode::UNAUTHORIZED, "Session expired");
    }
    envelope(json!({
        "id": DEALER_ID,
        "name": "Asha Auto Spares",
        "city": "Bengaluru",
        "pincode": "560001",
        "active": true,
    }))
    .into_response()
}

async fn statistics_down(State(observed): State<Observed>, headers: HeaderMap) -> Response {
    observed.record_auth(&headers);
    rejection(StatusCode::INTERNAL_SERVER_ERROR, "statistics store offline")
}

async fn pincode(State(observed): State<Observed>, Path(pincode): Path<String>) -> Response {
    observed.pincode_hits.fetch_add(1, Ordering::SeqCst);
    let serviceable = pincode.starts_with('5');
    envelope(json!({
        "pincode": pincode,
        "serviceable": serviceable,
        "etaDays": if serviceable { Some(2u32) } else { None },
        "dealerCount": if serviceable { 3 } else { 0 },
    }))
    .into_response()
}

/// Never responds; exists for the timeout-ceiling test.
async fn hang() -> Response {
    tokio::time::sleep(Duration::from_secs(3600)).await;
    StatusCode::OK.into_response()
}

/// 2xx with a body that is not the envelope.
async fn broken() -> Response {
    (StatusCode::OK, "this is not json").into_response()
}
