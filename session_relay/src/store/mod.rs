//! Client-side credential store
//!
//! Holds the bearer credential for one client script context (one tab),
//! mirrored into session-scoped storage so a reload within the tab keeps it.

mod errors;
mod storage;
mod sync;
mod token_store;

pub use errors::StorageError;
pub use storage::{MemorySessionStorage, SessionStorage, UnavailableStorage};
pub use sync::{BrowserHistory, SyncOutcome, sync_token_from_location};
pub use token_store::{TOKEN_STORAGE_KEY, TokenStore};
