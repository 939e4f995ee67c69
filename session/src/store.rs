//! Session store: token + profile lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation guard asks [`SessionStore::is_authenticated`]; pages call
//! `login`/`logout`/`register` here. The token lives both in memory and in
//! [`TokenStorage`], and every mutation updates the two together.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is retried. A failed login or profile fetch clears the session and
//! hands the error to the caller for display.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};

use crate::api;
use crate::config::ExpiryPolicy;
use crate::error::ApiError;
use crate::http::{ApiClient, Transport};
use crate::storage::{TOKEN_KEY, TokenStorage};
use crate::token;
use crate::types::{Credentials, MessageResponse, RegisterRequest, ResetPasswordRequest, User};

/// In-memory session: bearer token and the profile fetched with it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// Session hydrated from persisted storage; the profile is not persisted.
    #[must_use]
    pub fn from_storage<S: TokenStorage>(storage: &S) -> Self {
        let token = storage.token().unwrap_or_else(|e| {
            log::warn!("cannot read persisted token: {e}");
            None
        });
        Self { token, user: None }
    }

    /// Non-empty token present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Token present and, under [`ExpiryPolicy::Enforce`], unexpired at `now`.
    #[must_use]
    pub fn is_authenticated(&self, now: i64, policy: ExpiryPolicy) -> bool {
        self.token.as_deref().is_some_and(|t| token::is_valid(t, now, policy))
    }

    /// Token present and unexpired at `now`, regardless of policy.
    #[must_use]
    pub fn is_token_valid(&self, now: i64) -> bool {
        self.token.as_deref().is_some_and(|t| token::is_valid(t, now, ExpiryPolicy::Enforce))
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    /// Role of the loaded profile, `"user"` when none is loaded.
    #[must_use]
    pub fn role(&self) -> &str {
        self.user.as_ref().map_or(crate::types::DEFAULT_ROLE, User::role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// A token is held but its profile has not been fetched yet.
    #[must_use]
    pub fn needs_profile(&self) -> bool {
        self.has_token() && self.user.is_none()
    }
}

/// Executes auth flows against the API and keeps [`Session`] and persisted
/// storage in step.
pub struct SessionStore<T, S> {
    api: ApiClient<T, S>,
    session: Session,
}

impl<T: Transport, S: TokenStorage> SessionStore<T, S> {
    /// Store with the session hydrated from the client's storage.
    pub fn new(api: ApiClient<T, S>) -> Self {
        let session = Session::from_storage(api.storage());
        Self { api, session }
    }

    /// Store resuming an existing in-memory session.
    pub fn with_session(api: ApiClient<T, S>, session: Session) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    /// Authentication status under the client's configured expiry policy.
    pub fn is_authenticated(&self, now: i64) -> bool {
        self.session.is_authenticated(now, self.api.config().expiry)
    }

    /// Load the profile for a hydrated token before the first guarded route.
    ///
    /// Returns `true` when a profile is now loaded. An invalid token logs out;
    /// a failed fetch logs out only on 401 and otherwise keeps the token.
    pub async fn init(&mut self, now: i64) -> bool {
        let Some(token) = self.session.token.clone() else {
            return false;
        };
        if !token::is_valid(&token, now, self.api.config().expiry) {
            log::info!("persisted token is no longer valid; signing out");
            self.logout();
            return false;
        }
        match api::me(&self.api).await {
            Ok(user) => {
                self.session.user = Some(user);
                true
            }
            Err(e) => {
                log::warn!("restoring session failed: {e}");
                if e.is_unauthorized() {
                    self.logout();
                }
                false
            }
        }
    }

    /// Sign in: obtain a token, persist it, then load the profile.
    ///
    /// # Errors
    ///
    /// Any login or profile failure; the session is cleared first.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<User, ApiError> {
        log::info!("signing in as {}", credentials.username);
        let result = self.try_login(credentials).await;
        if let Err(e) = &result {
            log::warn!("sign-in failed: {e}");
            self.logout();
        }
        result
    }

    async fn try_login(&mut self, credentials: &Credentials) -> Result<User, ApiError> {
        let issued = api::login(&self.api, credentials).await?;
        self.set_token(&issued.access_token)?;
        self.fetch_profile().await
    }

    /// Fetch the profile for the current token.
    ///
    /// # Errors
    ///
    /// Any request failure, including 401; the session is cleared first.
    pub async fn fetch_profile(&mut self) -> Result<User, ApiError> {
        match api::me(&self.api).await {
            Ok(user) => {
                self.session.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                log::warn!("fetching profile failed: {e}");
                self.logout();
                Err(e)
            }
        }
    }

    /// Clear token and profile from memory and persisted storage.
    pub fn logout(&mut self) {
        self.session = Session::default();
        if let Err(e) = self.api.storage().remove(TOKEN_KEY) {
            log::error!("failed to clear persisted token: {e}");
        }
    }

    /// Create an account; does not sign in.
    ///
    /// # Errors
    ///
    /// The server's rejection or any transport failure.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<MessageResponse, ApiError> {
        let request = RegisterRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        };
        api::register(&self.api, &request).await
    }

    /// Reset the password of the account matching `username` and `email`.
    ///
    /// # Errors
    ///
    /// The server's rejection or any transport failure.
    pub async fn reset_password(
        &self,
        username: &str,
        email: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let request = ResetPasswordRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            new_password: new_password.to_owned(),
        };
        api::reset_password(&self.api, &request).await
    }

    /// Replace the token in memory and storage.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the token cannot be persisted.
    pub fn set_token(&mut self, token: &str) -> Result<(), ApiError> {
        self.api.storage().set(TOKEN_KEY, token)?;
        self.session.token = Some(token.to_owned());
        Ok(())
    }

    /// Drop the token from memory and storage, keeping the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the persisted token cannot be removed.
    pub fn clear_token(&mut self) -> Result<(), ApiError> {
        self.session.token = None;
        self.api.storage().remove(TOKEN_KEY)?;
        Ok(())
    }

    pub fn set_username(&mut self, username: &str) {
        if let Some(user) = &mut self.session.user {
            user.username = username.to_owned();
        }
    }

    pub fn set_user_id(&mut self, id: i64) {
        if let Some(user) = &mut self.session.user {
            user.id = id;
        }
    }
}
