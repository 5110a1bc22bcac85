//! Client interface and the request execution engine.
//!
//! [`WhoopClient::execute`] is the single choke point for every outbound
//! call: it acquires a local rate-limiter token, applies standard headers to
//! a private copy of the request, sends through the injected transport, and
//! retries with backoff on HTTP 429. All other failures are terminal. Every
//! suspension point is raced against the caller's [`CancellationToken`].

use crate::config::WhoopConfig;
use crate::errors::{classify, retry_after_seconds, WhoopError, WhoopResult};
use crate::resilience::{backoff_delay, RateLimiter};
use crate::services::{
    CycleService, RecoveryService, SleepService, UserService, WorkoutService,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// A single logical API request.
///
/// Constructed fresh per call and never shared between concurrent calls; the
/// executor works on its own copy of the headers, so the original is never
/// mutated.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured base URL, including any query string.
    pub path: String,
    /// Optional request body.
    pub body: Option<Bytes>,
    /// Caller-supplied headers. Standard headers are layered on top of a
    /// copy at send time.
    pub headers: HeaderMap,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Creates a GET request for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Attaches a request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// The WHOOP API client.
///
/// Cheap to clone; the configuration, transport, and rate limiter are
/// shared. The configuration is read-only after construction and the rate
/// limiter is internally synchronized, so a single client can serve any
/// number of concurrent tasks.
#[derive(Clone)]
pub struct WhoopClient {
    config: Arc<WhoopConfig>,
    transport: Arc<dyn HttpTransport>,
    rate_limiter: Arc<RateLimiter>,
}

impl WhoopClient {
    /// Creates a client with the production reqwest transport.
    pub fn new(config: WhoopConfig) -> WhoopResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Self::with_transport(config, transport)
    }

    /// Creates a client with an injected transport. This keeps the executor
    /// fully testable without sockets.
    pub fn with_transport(
        config: WhoopConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> WhoopResult<Self> {
        let rate_limiter = Arc::new(RateLimiter::new());
        rate_limiter.set_enabled(config.rate_limiting);

        Ok(Self {
            config: Arc::new(config),
            transport,
            rate_limiter,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &WhoopConfig {
        &self.config
    }

    /// Enables or disables local rate limiting at runtime.
    pub fn set_rate_limiting(&self, enabled: bool) {
        self.rate_limiter.set_enabled(enabled);
    }

    /// Service for user profile and body measurement endpoints.
    pub fn user(&self) -> UserService {
        UserService::new(self.clone())
    }

    /// Service for physiological cycle endpoints.
    pub fn cycle(&self) -> CycleService {
        CycleService::new(self.clone())
    }

    /// Service for sleep activity endpoints.
    pub fn sleep(&self) -> SleepService {
        SleepService::new(self.clone())
    }

    /// Service for workout activity endpoints.
    pub fn workout(&self) -> WorkoutService {
        WorkoutService::new(self.clone())
    }

    /// Service for recovery endpoints.
    pub fn recovery(&self) -> RecoveryService {
        RecoveryService::new(self.clone())
    }

    /// Executes a request with rate limiting, authentication headers, and
    /// automatic retries on HTTP 429.
    ///
    /// Cancellation is honored at every suspension point: during the
    /// rate-limiter wait ([`WhoopError::WaitInterrupted`]), during the send,
    /// and during a retry backoff (both [`WhoopError::Aborted`]). Transport
    /// failures and statuses other than 429 are terminal; 429 retries up to
    /// `max_retries` times, preferring a server-supplied `Retry-After` over
    /// the computed backoff.
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        request: &ApiRequest,
    ) -> WhoopResult<Response<Bytes>> {
        let url = self.request_url(&request.path)?;
        let headers = self.standard_headers(request)?;

        let mut attempt: u32 = 0;
        loop {
            self.rate_limiter.acquire(cancel).await?;

            let send = self.transport.send(
                request.method.clone(),
                url.clone(),
                headers.clone(),
                request.body.clone(),
            );
            let response = tokio::select! {
                result = send => match result {
                    Ok(response) => response,
                    Err(err) => {
                        if cancel.is_cancelled() {
                            return Err(WhoopError::Aborted);
                        }
                        // Network errors are terminal: only 429 is retried.
                        return Err(err);
                    }
                },
                _ = cancel.cancelled() => return Err(WhoopError::Aborted),
            };

            let status = response.status();
            if status != StatusCode::TOO_MANY_REQUESTS {
                if status.as_u16() >= 400 {
                    return Err(classify(
                        status.as_u16(),
                        response.headers(),
                        response.body(),
                        url.as_str(),
                    ));
                }
                return Ok(response);
            }

            if attempt >= self.config.max_retries {
                return Err(classify(
                    status.as_u16(),
                    response.headers(),
                    response.body(),
                    url.as_str(),
                ));
            }

            let server_wait = retry_after_seconds(response.headers());
            let delay = if server_wait > 0 {
                Duration::from_secs(server_wait)
            } else {
                backoff_delay(attempt, self.config.backoff_base, self.config.backoff_max)
            };
            warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                url = %url,
                "rate limited by API, backing off before retry"
            );

            tokio::select! {
                _ = tokio::time::sleep(delay) => attempt += 1,
                _ = cancel.cancelled() => return Err(WhoopError::Aborted),
            }
        }
    }

    /// Executes a request and decodes the JSON response body.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        request: &ApiRequest,
    ) -> WhoopResult<T> {
        let response = self.execute(cancel, request).await?;
        debug!(
            status = response.status().as_u16(),
            bytes = response.body().len(),
            "decoding response body"
        );
        Ok(serde_json::from_slice(response.body())?)
    }

    /// GET the given path and decode the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        path: &str,
    ) -> WhoopResult<T> {
        self.execute_json(cancel, &ApiRequest::get(path)).await
    }

    fn request_url(&self, path: &str) -> WhoopResult<Url> {
        let full = format!("{}{}", self.config.base_url, path);
        Url::parse(&full).map_err(|e| WhoopError::Configuration {
            message: format!("invalid request URL {full:?}: {e}"),
        })
    }

    /// Layer the standard headers over a copy of the caller's headers. The
    /// caller's request is never touched.
    fn standard_headers(&self, request: &ApiRequest) -> WhoopResult<HeaderMap> {
        let mut headers = request.headers.clone();

        if let Some(token) = &self.config.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| WhoopError::Configuration {
                    message: "access token is not a valid header value".to_string(),
                })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(crate::USER_AGENT),
        );
        if request.method != Method::GET && !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        Ok(headers)
    }
}

impl std::fmt::Debug for WhoopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhoopClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
