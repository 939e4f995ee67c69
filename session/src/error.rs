//! Error types shared by the HTTP client and the session store.

/// Failure reading or writing persisted session state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store does not exist in this environment (e.g. no `window`).
    #[error("storage unavailable")]
    Unavailable,
    /// The backing store rejected a read or write.
    #[error("storage I/O failed: {0}")]
    Io(String),
    /// Persisted data could not be parsed.
    #[error("storage data is corrupt: {0}")]
    Corrupt(String),
}

/// Error returned by every API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered 401.
    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },
    /// The server answered with any other non-success status.
    #[error("request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },
    /// The response body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Persisted token storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status carried by this error, if the server responded at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the credentials or the bearer token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
