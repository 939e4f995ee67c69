//! Auth endpoints of the chat API.
//!
//! Paths are relative to [`crate::config::ApiConfig::base_url`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::error::ApiError;
use crate::http::{ApiClient, Transport};
use crate::storage::TokenStorage;
use crate::types::{Credentials, MessageResponse, RegisterRequest, ResetPasswordRequest, TokenResponse, User};

pub const LOGIN_PATH: &str = "/auth/login";
pub const ME_PATH: &str = "/auth/me";
pub const REGISTER_PATH: &str = "/auth/register";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// Exchange credentials for a bearer token (`POST /auth/login`, form-encoded).
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for bad credentials and any other
/// [`ApiError`] the request produces.
pub async fn login<T: Transport, S: TokenStorage>(
    api: &ApiClient<T, S>,
    credentials: &Credentials,
) -> Result<TokenResponse, ApiError> {
    api.post_form(LOGIN_PATH, credentials.form_fields()).await
}

/// Fetch the profile of the token holder (`GET /auth/me`).
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the token is missing or rejected.
pub async fn me<T: Transport, S: TokenStorage>(api: &ApiClient<T, S>) -> Result<User, ApiError> {
    api.get_json(ME_PATH).await
}

/// Create an account (`POST /auth/register`).
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the server's reason (duplicate username,
/// weak password, ...) on rejection.
pub async fn register<T: Transport, S: TokenStorage>(
    api: &ApiClient<T, S>,
    request: &RegisterRequest,
) -> Result<MessageResponse, ApiError> {
    api.post_json(REGISTER_PATH, request).await
}

/// Reset a password by username + email (`POST /auth/reset-password`).
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the server's reason on rejection.
pub async fn reset_password<T: Transport, S: TokenStorage>(
    api: &ApiClient<T, S>,
    request: &ResetPasswordRequest,
) -> Result<MessageResponse, ApiError> {
    api.post_json(RESET_PASSWORD_PATH, request).await
}
