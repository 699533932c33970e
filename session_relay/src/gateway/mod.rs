mod client;
mod config;
mod errors;
mod types;

pub use client::ExchangeGateway;
pub use config::EXCHANGE_TIMEOUT;
pub use errors::GatewayError;
pub use types::{ExchangeResult, LogoutResponse};
