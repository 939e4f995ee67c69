//! Scripted transport and token helpers shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, Transport};

/// Transport that replays queued responses and records every request.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    replies: Rc<RefCell<VecDeque<Result<ApiResponse, String>>>>,
    pub(crate) requests: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(ApiResponse { status, body: body.to_owned() }));
        self
    }

    pub(crate) fn reply_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.reply(status, &body.to_string())
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.replies.borrow_mut().push_back(Err(message.to_owned()));
        self
    }

    pub(crate) fn sent(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(msg)) => Err(ApiError::Transport(msg)),
            None => Err(ApiError::Transport("no scripted reply".to_owned())),
        }
    }
}

/// Unsigned JWT with the given payload claims.
pub(crate) fn jwt(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2ln")
}

pub(crate) fn profile_json(id: i64, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "created_at": "2025-01-01T00:00:00",
        "updated_at": "2025-01-01T00:00:00"
    })
}
