//! Auth flows bound to the reactive session.
//!
//! Each flow builds a `SessionStore` from the current `AuthState`, runs the
//! core operation, and writes the resulting session back to the signal. The
//! HTTP client's unauthorized hook signs the user out and routes to `/login`.
//!
//! ERROR HANDLING
//! ==============
//! Errors are returned as-is so pages can render the server's message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::routes::{self, LOGIN_PATH};
use session::types::MessageResponse;
use session::{ApiClient, ApiConfig, ApiError, Credentials, Location, SessionStore, User};

use super::transport::GlooTransport;
use crate::state::auth::AuthState;
use crate::util::auth::now_secs;
use crate::util::storage::BrowserStorage;

pub type BrowserApi = ApiClient<GlooTransport, BrowserStorage>;
pub type BrowserStore = SessionStore<GlooTransport, BrowserStorage>;

/// API configuration for the browser build: same-origin `/api/v1`.
pub fn config() -> ApiConfig {
    ApiConfig::default()
}

/// Configured API client. A 401 to any authenticated request clears `auth`
/// and navigates to `/login`.
pub fn api_client<N>(auth: RwSignal<AuthState>, navigate: N) -> BrowserApi
where
    N: Fn(&str, NavigateOptions) + 'static,
{
    ApiClient::new(config(), GlooTransport, BrowserStorage).on_unauthorized(sign_out_hook(auth, navigate))
}

/// Unauthorized hook: drop the reactive session and go to `/login`.
pub(crate) fn sign_out_hook<N>(auth: RwSignal<AuthState>, navigate: N) -> impl Fn() + 'static
where
    N: Fn(&str, NavigateOptions) + 'static,
{
    move || {
        auth.update(AuthState::sign_out);
        navigate(LOGIN_PATH, NavigateOptions::default());
    }
}

fn store<N>(auth: RwSignal<AuthState>, navigate: N) -> BrowserStore
where
    N: Fn(&str, NavigateOptions) + 'static,
{
    SessionStore::with_session(api_client(auth, navigate), auth.get_untracked().session)
}

/// Exchange the hydrated token for a profile before the guard runs.
pub async fn restore_session<N>(auth: RwSignal<AuthState>, navigate: N)
where
    N: Fn(&str, NavigateOptions) + 'static,
{
    let mut store = store(auth, navigate);
    let restored = store.init(now_secs()).await;
    log::debug!("session restore finished: restored={restored}");
    auth.set(AuthState::settled(store.into_session()));
}

/// Sign in and publish the new session.
///
/// # Errors
///
/// Bad credentials or any request failure; the session is left signed out.
pub async fn login<N>(auth: RwSignal<AuthState>, navigate: N, credentials: Credentials) -> Result<User, ApiError>
where
    N: Fn(&str, NavigateOptions) + 'static,
{
    let mut store = store(auth, navigate);
    let result = store.login(&credentials).await;
    auth.set(AuthState::settled(store.into_session()));
    result
}

/// Re-fetch the profile for the current token, e.g. when a protected page
/// mounts. A 401 signs out through the client's unauthorized hook; any other
/// failure also ends the session and leaves `current` if it requires
/// authentication.
///
/// # Errors
///
/// Any request failure; the session is cleared.
pub async fn refresh_profile<N>(auth: RwSignal<AuthState>, navigate: N, current: Location) -> Result<User, ApiError>
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let had_token = auth.with_untracked(|s| s.session.has_token());
    let mut store = store(auth, navigate.clone());
    let result = store.fetch_profile().await;
    auth.set(AuthState::settled(store.into_session()));
    if let Err(e) = &result {
        // The hook has already navigated for a rejected bearer token.
        let hook_fired = had_token && e.is_unauthorized();
        if !hook_fired {
            if let Some(target) = routes::logout_redirect(&current) {
                navigate(&target, NavigateOptions::default());
            }
        }
    }
    result
}

/// Sign out. Returns where to navigate if `current` requires authentication.
pub fn logout(auth: RwSignal<AuthState>, current: &Location) -> Option<String> {
    let mut store = store(auth, |_: &str, _: NavigateOptions| {});
    store.logout();
    auth.set(AuthState::settled(store.into_session()));
    routes::logout_redirect(current)
}

/// Create an account.
///
/// # Errors
///
/// The server's rejection reason or a transport failure.
pub async fn register(
    auth: RwSignal<AuthState>,
    username: &str,
    email: &str,
    password: &str,
) -> Result<MessageResponse, ApiError> {
    store(auth, |_: &str, _: NavigateOptions| {}).register(username, email, password).await
}

/// Reset a password by username + email.
///
/// # Errors
///
/// The server's rejection reason or a transport failure.
pub async fn reset_password(
    auth: RwSignal<AuthState>,
    username: &str,
    email: &str,
    new_password: &str,
) -> Result<MessageResponse, ApiError> {
    store(auth, |_: &str, _: NavigateOptions| {}).reset_password(username, email, new_password).await
}

/// User-facing text for an auth error.
pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => detail.clone(),
        ApiError::Transport(_) => "Cannot reach the server. Check your connection and try again.".to_owned(),
        ApiError::Decode(_) => "The server sent an unexpected response.".to_owned(),
        ApiError::Storage(e) => format!("Cannot save your session: {e}"),
    }
}
