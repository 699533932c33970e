//! Direct client-to-backend calls authenticated with the stored bearer token

mod client;
mod errors;
mod types;

pub use client::BackendClient;
pub use errors::ClientError;
pub use types::{ProfileUpdate, UserProfile};
