//! Client-side session core for the chat web application.
//!
//! This crate owns everything about authentication that does not depend on a
//! browser: the session model, bearer-token decoding, persisted token storage,
//! the static route table and navigation guard, and the HTTP client with its
//! request/response interceptors. Both the Leptos `client` and the native
//! `cli` drive it through their own [`http::Transport`] and
//! [`storage::TokenStorage`] implementations.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod routes;
pub mod storage;
pub mod store;
pub mod token;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ApiConfig, ExpiryPolicy};
pub use error::{ApiError, StorageError};
pub use guard::GuardDecision;
pub use http::{ApiClient, Transport};
pub use routes::Location;
pub use storage::{MemoryStorage, TOKEN_KEY, TokenStorage};
pub use store::{Session, SessionStore};
pub use types::{Credentials, User};
