//! HTTP transport layer.
//!
//! The executor talks to the network through the [`HttpTransport`] trait so
//! tests can substitute a scripted transport without opening sockets. The
//! transport reports every HTTP response as success regardless of status;
//! classifying and retrying on status codes is the executor's job.

use crate::errors::{WhoopError, WhoopResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, Response};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP transport seam for outbound API requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the full buffered response.
    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> WhoopResult<Response<Bytes>>;
}

/// Reqwest-based production transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> WhoopResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            WhoopError::Configuration {
                message: format!("failed to create HTTP client: {e}"),
            }
        })?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client, keeping its connection pool.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> WhoopResult<Response<Bytes>> {
        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;

        let mut builder = Response::builder().status(status);
        if let Some(headers) = builder.headers_mut() {
            *headers = response_headers;
        }
        builder.body(body).map_err(|e| WhoopError::Transport {
            message: format!("failed to assemble response: {e}"),
        })
    }
}

fn transport_error(err: reqwest::Error) -> WhoopError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("http execute request failed: {err}")
    };
    WhoopError::Transport { message }
}
