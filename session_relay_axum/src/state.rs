use std::sync::Arc;

use session_relay::{ExchangeGateway, GatewayError, RequestGate};

/// Shared state for the relay routes and the gate middleware.
///
/// Immutable after startup; clones share the HTTP connection pool.
#[derive(Clone, Debug)]
pub struct RelayState {
    gateway: ExchangeGateway,
    gate: Arc<RequestGate>,
}

impl RelayState {
    pub fn new(gateway: ExchangeGateway, gate: RequestGate) -> Self {
        Self {
            gateway,
            gate: Arc::new(gate),
        }
    }

    /// State built from the environment (`BACKEND_API_URL`, `REQUEST_GATE_ENABLED`, ...)
    pub fn from_env() -> Result<Self, GatewayError> {
        Ok(Self::new(ExchangeGateway::from_env()?, RequestGate::from_env()))
    }

    pub fn gateway(&self) -> &ExchangeGateway {
        &self.gateway
    }

    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }
}
