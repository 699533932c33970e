//! Request gate decision table
//!
//! Framework independent: the integration layer reads the path and the auth
//! cookie, asks [`RequestGate::decide`], and acts on the [`GateDecision`].

mod allow_list;
mod config;
mod decision;

pub use allow_list::AllowList;
pub use config::IDP_LOGIN_URL;
pub use decision::{GateDecision, GateSettings, RequestGate, refresh_session_cookie};
