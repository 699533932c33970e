//! Unverified, display-only session identity
//!
//! Nothing in here checks a signature. The resulting [`DisplayIdentity`] is
//! for rendering only; the request gate and every backend call decide access
//! on their own, and no type in this crate accepts a `DisplayIdentity` as
//! proof of anything.

mod resolve;
mod types;

pub use resolve::{resolve, resolve_from_headers};
pub use types::DisplayIdentity;
