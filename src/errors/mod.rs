//! Error types for the WHOOP API client.
//!
//! Terminal HTTP failures are classified into three kinds: authentication
//! failures, rate-limit failures, and generic API errors. The specific kinds
//! wrap the generic [`ApiError`] as their source so callers can recover the
//! raw status, message, and URL by walking the error chain.

use http::HeaderMap;
use thiserror::Error;

/// Result type alias for WHOOP operations.
pub type WhoopResult<T> = Result<T, WhoopError>;

/// Maximum number of response-body bytes retained in an error message.
/// Longer bodies are truncated with a trailing `...` marker so a hostile or
/// buggy server cannot force unbounded memory retention.
const MAX_ERROR_BODY_BYTES: usize = 1000;

/// Generic error carried by every unsuccessful WHOOP API response.
#[derive(Error, Debug, Clone)]
#[error("whoop api error: {status} - {message} at {url}")]
pub struct ApiError {
    /// HTTP status code of the failed response.
    pub status: u16,
    /// Response body, truncated to a bounded length.
    pub message: String,
    /// URL of the request that failed.
    pub url: String,
}

/// Main error type for the WHOOP API client.
#[derive(Error, Debug)]
pub enum WhoopError {
    /// Terminal HTTP error that is neither an auth nor a rate-limit failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authentication or authorization failure (401, 403).
    #[error("whoop auth error ({status}): authentication failed or forbidden")]
    Auth {
        /// HTTP status code (401 or 403).
        status: u16,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// The API rejected the request with 429 and retries are exhausted.
    #[error("whoop rate limit exceeded: retry after {retry_after} seconds")]
    RateLimit {
        /// Server-suggested wait in seconds, 0 when none was provided.
        retry_after: u64,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// Network-level failure below the HTTP layer. Never retried.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the network failure.
        message: String,
    },

    /// Cancellation fired while waiting for a rate-limiter token.
    #[error("local rate limit wait interrupted")]
    WaitInterrupted,

    /// Cancellation fired during the send or a retry backoff.
    #[error("request aborted by cancellation")]
    Aborted,

    /// Invalid client configuration.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// Response body failed to decode as the expected JSON shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WhoopError {
    /// HTTP status code of the terminal response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            WhoopError::Api(api) => Some(api.status),
            WhoopError::Auth { status, .. } => Some(*status),
            WhoopError::RateLimit { source, .. } => Some(source.status),
            _ => None,
        }
    }

    /// Server-suggested retry delay in seconds, for rate-limit errors.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            WhoopError::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors produced by webhook verification and decoding.
///
/// Handlers should respond 401 on any of these regardless of which check
/// failed, so verification internals are not leaked to the sender.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The inbound request used a method other than POST.
    #[error("webhook must be a POST request")]
    MethodNotAllowed,

    /// The `X-Whoop-Signature` header was absent or empty.
    #[error("missing X-Whoop-Signature header")]
    MissingSignature,

    /// The provided signature did not match the computed one.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// The request body could not be read.
    #[error("failed to read webhook body: {0}")]
    BodyRead(#[from] std::io::Error),

    /// The body passed verification but is not a valid event payload.
    #[error("failed to parse webhook json: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}

/// Classify an unsuccessful HTTP response into a typed error.
///
/// 401/403 become [`WhoopError::Auth`], 429 becomes [`WhoopError::RateLimit`]
/// with `retry_after` parsed from the `Retry-After` header, and everything
/// else ≥ 400 stays a generic [`WhoopError::Api`].
pub fn classify(status: u16, headers: &HeaderMap, body: &[u8], url: &str) -> WhoopError {
    let base = ApiError {
        status,
        message: truncate_message(body),
        url: url.to_string(),
    };

    match status {
        401 | 403 => WhoopError::Auth {
            status,
            source: base,
        },
        429 => WhoopError::RateLimit {
            retry_after: retry_after_seconds(headers),
            source: base,
        },
        _ => WhoopError::Api(base),
    }
}

/// Parse the `Retry-After` header as a positive whole number of seconds.
/// Absent, unparseable, or non-positive values yield 0.
pub(crate) fn retry_after_seconds(headers: &HeaderMap) -> u64 {
    headers
        .get(http::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|seconds| *seconds > 0)
        .map_or(0, |seconds| seconds as u64)
}

fn truncate_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_ERROR_BODY_BYTES {
        return text.into_owned();
    }
    let mut cut = MAX_ERROR_BODY_BYTES;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}
