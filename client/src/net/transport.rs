//! `gloo-net` implementation of `session::Transport`.
//!
//! Client-side (csr): real `fetch` calls. Native builds: every request fails
//! with a transport error since there is no browser to send it from.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use session::ApiError;
use session::http::{ApiRequest, ApiResponse, Transport};

/// `fetch`-backed transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

/// `application/x-www-form-urlencoded` body for `fields`.
#[cfg(any(test, feature = "csr"))]
fn form_body(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(feature = "csr")]
fn gloo_method(method: session::http::Method) -> gloo_net::http::Method {
    use gloo_net::http::Method as M;
    use session::http::Method;
    match method {
        Method::Get => M::GET,
        Method::Post => M::POST,
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::RequestBuilder;
            use session::http::RequestBody;

            let transport_err = |e: gloo_net::Error| ApiError::Transport(e.to_string());

            let mut builder = RequestBuilder::new(&request.url).method(gloo_method(request.method));
            if let Some(value) = request.authorization() {
                builder = builder.header("Authorization", &value);
            }
            if let Some(content_type) = request.body.content_type() {
                builder = builder.header("Content-Type", content_type);
            }
            let prepared = match &request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.body(value.to_string()),
                RequestBody::Form(fields) => builder.body(form_body(fields)),
            }
            .map_err(transport_err)?;

            let resp = prepared.send().await.map_err(transport_err)?;
            let status = resp.status();
            let body = resp.text().await.map_err(transport_err)?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }
}
