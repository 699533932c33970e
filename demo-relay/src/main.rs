use axum::{Router, middleware, routing::get};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_relay_axum::{RelayState, request_gate, session_relay_router};

mod handlers;
mod server;

use crate::{
    handlers::{dashboard, index},
    server::spawn_http_server,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,session_relay=debug,session_relay_axum=debug,tower_http=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = RelayState::from_env()?;

    let app = Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard))
        .merge(session_relay_router(state.clone()))
        .layer(middleware::from_fn_with_state(state, request_gate));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    spawn_http_server(port, app).await??;
    Ok(())
}
