//! Shared test helpers: an in-process mock backend and test credentials

use std::time::Duration;

use axum::{Json, Router, body::Body, http::Request, routing::post};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use session_relay::{AllowList, ExchangeGateway, GateSettings, RequestGate};

use crate::RelayState;

pub(crate) const LOGIN_URL: &str = "https://idp.example.com/login";

/// Serve `router` on 127.0.0.1 and return its base URL.
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Mock backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock backend stopped");
    });
    format!("http://{addr}")
}

/// Base URL nothing listens on.
pub(crate) async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    format!("http://{addr}")
}

/// A backend that accepts any code and issues `credential` as the auth cookie.
pub(crate) fn issuing_backend(credential: &str) -> Router {
    let set_cookie = format!("auth_token={credential}; HttpOnly; Secure; Path=/");
    Router::new()
        .route(
            "/api/auth/exchange",
            post(move || {
                let set_cookie = set_cookie.clone();
                async move { ([("set-cookie", set_cookie)], Json(json!({ "success": true }))) }
            }),
        )
        .route(
            "/api/auth/logout",
            post(|| async {
                Json(json!({
                    "success": true,
                    "message": "Logged out",
                    "workosLogoutUrl": "https://idp.example.com/logout"
                }))
            }),
        )
}

pub(crate) fn relay_state(backend: &str, gate_enabled: bool) -> RelayState {
    let gateway = ExchangeGateway::new(backend, Duration::from_secs(5))
        .expect("Failed to build gateway");
    let gate = RequestGate::new(GateSettings {
        enabled: gate_enabled,
        allow_list: AllowList::new(["/", "/callback", "/unauthorize", "/public/*"]),
        login_url: LOGIN_URL.to_string(),
    });
    RelayState::new(gateway, gate)
}

pub(crate) fn make_credential(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .expect("Failed to encode test credential")
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

pub(crate) fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .expect("Failed to build request")
}
