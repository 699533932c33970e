//! Test utilities shared by the unit tests of this crate
//!
//! Backend calls are exercised against a real axum server bound to an
//! ephemeral local port, so the reqwest client runs unmodified.

use axum::Router;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;

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

/// A base URL nothing listens on, for connection failures.
pub(crate) async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    format!("http://{addr}")
}

/// Mint a real three-segment HS256 credential carrying `claims`.
pub(crate) fn make_credential(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .expect("Failed to encode test credential")
}
