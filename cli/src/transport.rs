//! `reqwest` implementation of `session::Transport`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use session::ApiError;
use session::http::{ApiRequest, ApiResponse, Method, RequestBody, Transport};

#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self.http.request(reqwest_method(request.method), &request.url);
        if let Some(value) = request.authorization() {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        let resp = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(%status, url = %request.url, "response received");
        Ok(ApiResponse { status, body })
    }
}
