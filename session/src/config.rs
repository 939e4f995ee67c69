//! Client configuration shared by every frontend.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Base URL the SPA is served against; the API lives under the same origin.
pub const DEFAULT_BASE_URL: &str = "/api/v1";

/// Whether the `exp` claim of the bearer token gates authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// Expired or undecodable tokens count as signed out.
    #[default]
    Enforce,
    /// Any non-empty token counts as signed in.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub expiry: ExpiryPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), expiry: ExpiryPolicy::default() }
    }
}

impl ApiConfig {
    /// Config pointed at `base_url`, trailing slashes removed.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), ..Self::default() }
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: ExpiryPolicy) -> Self {
        self.expiry = expiry;
        self
    }

    /// Join an endpoint path (leading `/`) onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
