//! HTTP client with auth interceptors.
//!
//! ARCHITECTURE
//! ============
//! [`ApiClient`] owns the cross-cutting behavior every request shares:
//! base-URL joining, bearer-token injection from persisted storage, and the
//! 401 handling that ends a session. The network itself is a [`Transport`]
//! so the browser (`gloo-net`), the CLI (`reqwest`) and tests plug in their
//! own.
//!
//! ERROR HANDLING
//! ==============
//! Every non-2xx status becomes an [`ApiError`]. A 401 to a request that
//! carried a bearer token also removes the persisted token and fires the
//! unauthorized hook before the error is returned.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::storage::{TOKEN_KEY, TokenStorage};
use crate::types::error_detail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// `Content-Type` header for this body, if it has one.
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some("application/json"),
            Self::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }
}

/// A fully intercepted request, ready for a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute or origin-relative URL.
    pub url: String,
    pub body: RequestBody,
    /// Raw token for the `Authorization: Bearer` header.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// `Authorization` header value, if a token is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_deref().map(bearer_header)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Moves one request over the network.
///
/// Implementations report only transport failures as errors; every HTTP
/// status, including 4xx/5xx, comes back as an [`ApiResponse`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// What the response interceptor does with a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDisposition {
    /// 2xx: hand the body to the caller.
    Success,
    /// 401 on an authenticated request: end the session.
    SessionExpired,
    /// 401 without a token, e.g. bad login credentials.
    Unauthorized,
    /// Any other status: surface as an error.
    Failure,
}

/// Classify `status` for a request that did (`authenticated`) or did not
/// carry a bearer token.
#[must_use]
pub fn classify(status: u16, authenticated: bool) -> ResponseDisposition {
    match status {
        200..=299 => ResponseDisposition::Success,
        401 if authenticated => ResponseDisposition::SessionExpired,
        401 => ResponseDisposition::Unauthorized,
        _ => ResponseDisposition::Failure,
    }
}

type UnauthorizedHook = Rc<dyn Fn()>;

/// Configured API client: base URL, token storage and interceptors.
pub struct ApiClient<T, S> {
    config: ApiConfig,
    transport: T,
    storage: S,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<T: Transport, S: TokenStorage> ApiClient<T, S> {
    pub fn new(config: ApiConfig, transport: T, storage: S) -> Self {
        Self { config, transport, storage, on_unauthorized: None }
    }

    /// Run `hook` whenever an authenticated request is answered with 401.
    #[must_use]
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request interceptor: resolve the URL and attach the persisted token.
    fn prepare(&self, method: Method, path: &str, body: RequestBody) -> Result<ApiRequest, ApiError> {
        let bearer = self.storage.token()?;
        Ok(ApiRequest { method, url: self.config.url(path), body, bearer })
    }

    /// Send `body` to `path` and return the raw successful response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response arrived,
    /// [`ApiError::Unauthorized`] on 401 and [`ApiError::Status`] on any
    /// other non-2xx status.
    pub async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<ApiResponse, ApiError> {
        let request = self.prepare(method, path, body)?;
        let authenticated = request.bearer.is_some();
        log::debug!("{} {}", method.as_str(), request.url);
        let response = self.transport.send(request).await?;

        match classify(response.status, authenticated) {
            ResponseDisposition::Success => Ok(response),
            ResponseDisposition::SessionExpired => {
                log::warn!("{} {} answered 401; clearing session", method.as_str(), path);
                if let Err(e) = self.storage.remove(TOKEN_KEY) {
                    log::error!("failed to clear persisted token: {e}");
                }
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
                Err(ApiError::Unauthorized { detail: error_detail(&response.body, "Unauthorized") })
            }
            ResponseDisposition::Unauthorized => {
                Err(ApiError::Unauthorized { detail: error_detail(&response.body, "Unauthorized") })
            }
            ResponseDisposition::Failure => Err(ApiError::Status {
                status: response.status,
                detail: error_detail(&response.body, "Request failed"),
            }),
        }
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`].
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(Method::Get, path, RequestBody::Empty).await?.json()
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`].
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.send(Method::Post, path, body).await?.json()
    }

    /// `POST` form fields and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`].
    pub async fn post_form<R: DeserializeOwned>(&self, path: &str, fields: Vec<(String, String)>) -> Result<R, ApiError> {
        self.send(Method::Post, path, RequestBody::Form(fields)).await?.json()
    }
}
