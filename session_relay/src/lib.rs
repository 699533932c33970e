//! session_relay - Moves an OAuth session credential across the cookie/script boundary
//!
//! The server side exchanges the OAuth code with the backend, forwards the
//! backend's cookies, and hands the credential to the browser exactly once on
//! the success redirect. The client side keeps that credential in a
//! tab-scoped [`TokenStore`] for direct backend calls. A framework-independent
//! [`RequestGate`] decides per request whether a session is required.

mod client;
mod config;
mod error_code;
mod gate;
mod gateway;
mod identity;
mod relay;
mod store;
mod termination;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{
    AUTH_COOKIE_NAME, BACKEND_API_URL, CALLBACK_PATH, ERROR_QUERY_PARAM, HOME_PATH,
    IDP_LOGOUT_FALLBACK_URL, IDP_SESSION_COOKIE_NAME, RELAY_DEVELOPMENT, SESSION_MAX_AGE,
    TOKEN_QUERY_PARAM, UNAUTHORIZED_PATH,
};
pub use error_code::AuthErrorCode;

pub use gateway::{EXCHANGE_TIMEOUT, ExchangeGateway, ExchangeResult, GatewayError, LogoutResponse};
pub use relay::{CallbackOutcome, RelayError, extract_cookie_value, handle_callback};

pub use store::{
    BrowserHistory, MemorySessionStorage, SessionStorage, StorageError, SyncOutcome,
    TOKEN_STORAGE_KEY, TokenStore, UnavailableStorage, sync_token_from_location,
};

pub use identity::{DisplayIdentity, resolve, resolve_from_headers};

pub use gate::{
    AllowList, GateDecision, GateSettings, IDP_LOGIN_URL, RequestGate, refresh_session_cookie,
};

pub use termination::{Termination, terminate_session};

pub use client::{BackendClient, ClientError, ProfileUpdate, UserProfile};

pub use utils::{UtilError, get_cookie_from_headers};
